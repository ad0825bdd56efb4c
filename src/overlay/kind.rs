use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Exit animation length for the centered modals.
pub const MODAL_HIDE_DELAY: Duration = Duration::from_millis(300);
/// Exit animation length for the payment bottom sheet.
pub const SHEET_HIDE_DELAY: Duration = Duration::from_millis(400);

/// The overlays that take part in back-navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayKind {
    Salary,
    Reminder,
    Order,
    Payment,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::Salary,
        OverlayKind::Reminder,
        OverlayKind::Order,
        OverlayKind::Payment,
    ];

    /// Back-resolution order, highest first.
    pub const PRIORITY: [OverlayKind; 4] = [
        OverlayKind::Payment,
        OverlayKind::Reminder,
        OverlayKind::Order,
        OverlayKind::Salary,
    ];

    pub const fn index(self) -> usize {
        match self {
            OverlayKind::Salary => 0,
            OverlayKind::Reminder => 1,
            OverlayKind::Order => 2,
            OverlayKind::Payment => 3,
        }
    }

    pub const fn hide_delay(self) -> Duration {
        match self {
            OverlayKind::Payment => SHEET_HIDE_DELAY,
            _ => MODAL_HIDE_DELAY,
        }
    }

    /// The reminder floats above whatever is underneath and leaves the
    /// background scroll alone.
    pub const fn locks_scroll(self) -> bool {
        !matches!(self, OverlayKind::Reminder)
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverlayKind::Salary => "salary",
            OverlayKind::Reminder => "reminder",
            OverlayKind::Order => "order",
            OverlayKind::Payment => "payment",
        };
        write!(f, "{}", s)
    }
}

/// How a back event picks the overlay to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackResolution {
    /// First active overlay in `OverlayKind::PRIORITY`.
    #[default]
    Priority,
    /// Pop the most recently opened overlay.
    Stack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_and_unique() {
        let mut seen = [false; 4];
        for kind in OverlayKind::ALL {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn only_reminder_leaves_scroll_alone() {
        assert!(OverlayKind::Salary.locks_scroll());
        assert!(OverlayKind::Order.locks_scroll());
        assert!(OverlayKind::Payment.locks_scroll());
        assert!(!OverlayKind::Reminder.locks_scroll());
    }

    #[test]
    fn payment_sheet_waits_longer() {
        assert_eq!(OverlayKind::Payment.hide_delay(), Duration::from_millis(400));
        assert_eq!(OverlayKind::Order.hide_delay(), Duration::from_millis(300));
    }
}
