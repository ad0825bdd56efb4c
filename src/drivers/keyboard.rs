use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in key reporting before events reach
/// the store: Shift+Tab becomes BackTab, and only presses get through.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                if key.code == KeyCode::BackTab {
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                // Windows reports press, repeat and release; a held Esc would
                // otherwise pop one overlay per repeat.
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    KeyEventKind::Repeat if key.code == KeyCode::Esc => return None,
                    _ => {}
                }
                if key.code == KeyCode::Esc {
                    if self.esc_down && cfg!(windows) {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            Event::Mouse(_) => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        let out = norm.normalize(Event::Key(key)).expect("should return event");
        let Event::Key(k) = out else {
            panic!("expected key event");
        };
        assert_eq!(k.code, KeyCode::BackTab);
        assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn release_key_is_ignored() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(key)).is_none());
    }

    #[test]
    fn esc_repeat_is_dropped() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        key.kind = KeyEventKind::Repeat;
        assert!(norm.normalize(Event::Key(key)).is_none());
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        assert!(norm.normalize(Event::Resize(10, 20)).is_some());
    }
}
