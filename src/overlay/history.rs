//! Navigation history the overlays mirror their frames onto.
//!
//! Every open overlay pushes one history entry, so the back gesture closes
//! the overlay instead of leaving the page. `NavigationHost` is that
//! contract; `SessionHistory` is the in-process host the terminal front end
//! uses, where Esc plays the role of the back gesture.

use std::collections::VecDeque;

use thiserror::Error;

use super::OverlayKind;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation history is unavailable")]
    Unavailable,
}

/// One history entry, tagged with the overlay that pushed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFrame {
    pub kind: OverlayKind,
    pub seq: u64,
}

pub trait NavigationHost {
    fn push(&mut self, kind: OverlayKind) -> Result<HistoryFrame, NavigationError>;

    /// Ask the host to go back one entry. The resulting back event is
    /// delivered later through `poll_back`, never synchronously.
    fn back(&mut self) -> Result<(), NavigationError>;

    /// Next delivered back event, if any.
    fn poll_back(&mut self) -> Option<HistoryFrame>;

    fn depth(&self) -> usize;
}

#[derive(Debug)]
pub struct SessionHistory {
    frames: Vec<HistoryFrame>,
    popped: VecDeque<HistoryFrame>,
    next_seq: u64,
    available: bool,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            popped: VecDeque::new(),
            next_seq: 0,
            available: true,
        }
    }

    /// A host without a usable history; every call reports `Unavailable`.
    pub fn detached() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn frames(&self) -> &[HistoryFrame] {
        &self.frames
    }
}

impl NavigationHost for SessionHistory {
    fn push(&mut self, kind: OverlayKind) -> Result<HistoryFrame, NavigationError> {
        if !self.available {
            return Err(NavigationError::Unavailable);
        }
        let frame = HistoryFrame {
            kind,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.frames.push(frame);
        Ok(frame)
    }

    fn back(&mut self) -> Result<(), NavigationError> {
        if !self.available {
            return Err(NavigationError::Unavailable);
        }
        if let Some(frame) = self.frames.pop() {
            self.popped.push_back(frame);
        }
        Ok(())
    }

    fn poll_back(&mut self) -> Option<HistoryFrame> {
        self.popped.pop_front()
    }

    fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_is_delivered_on_poll() {
        let mut h = SessionHistory::new();
        h.push(OverlayKind::Order).unwrap();
        h.push(OverlayKind::Reminder).unwrap();
        h.back().unwrap();
        assert_eq!(h.depth(), 1);
        let popped = h.poll_back().expect("back event");
        assert_eq!(popped.kind, OverlayKind::Reminder);
        assert!(h.poll_back().is_none());
    }

    #[test]
    fn back_on_empty_history_delivers_nothing() {
        let mut h = SessionHistory::new();
        h.back().unwrap();
        assert!(h.poll_back().is_none());
    }

    #[test]
    fn detached_history_reports_unavailable() {
        let mut h = SessionHistory::detached();
        assert_eq!(
            h.push(OverlayKind::Salary),
            Err(NavigationError::Unavailable)
        );
        assert_eq!(h.back(), Err(NavigationError::Unavailable));
    }
}
