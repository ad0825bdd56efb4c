use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod debug_log;
pub mod dialog_overlay;
pub mod status_bar;
pub mod text_input;

pub use debug_log::DebugLogComponent;
pub use dialog_overlay::{DialogAnchor, DialogOverlayComponent};
pub use status_bar::StatusBar;
pub use text_input::TextInputComponent;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
