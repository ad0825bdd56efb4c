//! Clipboard writes for the copy buttons.
//!
//! Copying is best effort: a missing clipboard backend turns into a short
//! "error" label on the button, never a failure of the surrounding action.

use std::time::Duration;

use thiserror::Error;

/// How long a copy button shows its result before reverting.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via `arboard`, opened per write so a backend that
/// comes and goes (e.g. over SSH) is retried on the next press.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = arboard::Clipboard::new()?;
        cb.set_text(text.to_owned()).map_err(ClipboardError::from)
    }
}

/// State of a copy button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyFeedback {
    pub fn label(self) -> &'static str {
        match self {
            CopyFeedback::Idle => "نسخ",
            CopyFeedback::Copied => "تم ✓",
            CopyFeedback::Failed => "خطأ",
        }
    }
}
