use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Single-line text field used for the search box and the player id.
#[derive(Debug, Default, Clone)]
pub struct TextInputComponent {
    title: String,
    placeholder: String,
    value: String,
    invalid: bool,
    shift: i16,
}

impl TextInputComponent {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.invalid = false;
        self.shift = 0;
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Highlight the border as an input error.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Horizontal offset in cells, used for the shake animation.
    pub fn set_shift(&mut self, shift: i16) {
        self.shift = shift;
    }
}

impl Component for TextInputComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        let palette = ctx.palette();
        let x = i32::from(area.x) + i32::from(self.shift);
        let area = Rect {
            x: x.clamp(0, i32::from(u16::MAX)) as u16,
            ..area
        };
        let border = if self.invalid {
            palette.error
        } else if ctx.focused() {
            palette.accent
        } else {
            palette.muted
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.as_str())
            .border_style(Style::default().fg(border));
        let (text, style) = if self.value.is_empty() && !ctx.focused() {
            (
                self.placeholder.clone(),
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if ctx.focused() {
            (format!("{}▏", self.value), Style::default().fg(palette.fg))
        } else {
            (self.value.clone(), Style::default().fg(palette.fg))
        };
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.value.push(c);
                self.invalid = false;
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInputComponent::new("id", "");
        let ctx = ComponentContext::default();
        assert!(input.handle_event(&key(KeyCode::Char('4')), &ctx));
        assert!(input.handle_event(&key(KeyCode::Char('2')), &ctx));
        assert!(input.handle_event(&key(KeyCode::Backspace), &ctx));
        assert_eq!(input.value(), "4");
        assert!(!input.handle_event(&key(KeyCode::Enter), &ctx));
    }

    #[test]
    fn typing_clears_error_highlight() {
        let mut input = TextInputComponent::new("id", "");
        input.set_invalid(true);
        input.handle_event(&key(KeyCode::Char('a')), &ComponentContext::default());
        assert!(!input.invalid());
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut input = TextInputComponent::new("id", "");
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!input.handle_event(&ev, &ComponentContext::default()));
        assert!(input.value().is_empty());
    }
}
