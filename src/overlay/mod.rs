//! Overlay navigation: which modal or sheet is open, how it maps onto the
//! navigation history, and when it finally disappears.

pub mod controller;
pub mod history;
pub mod kind;
pub mod timer;

pub use controller::{OverlayController, OverlayState, OverlayTick};
pub use history::{HistoryFrame, NavigationError, NavigationHost, SessionHistory};
pub use kind::{BackResolution, MODAL_HIDE_DELAY, OverlayKind, SHEET_HIDE_DELAY};
pub use timer::{TimerId, TimerQueue};
