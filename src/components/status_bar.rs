use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-line bar: hints on the left, status on the right.
#[derive(Debug, Default)]
pub struct StatusBar {
    left: String,
    right: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let palette = ctx.palette();
        let style = Style::default().fg(palette.muted).bg(palette.surface);
        let width = area.width as usize;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        buffer.set_style(bounds, style);

        let left = truncate_to_width(&self.left, width);
        safe_set_string(buffer, bounds, area.x, area.y, &left, style);

        if !self.right.is_empty() {
            let right = truncate_to_width(&self.right, width);
            let right_width = right.chars().count();
            if right_width < width {
                let start_x = area.x.saturating_add((width - right_width) as u16);
                let right_style = style.fg(palette.accent);
                safe_set_string(buffer, bounds, start_x, area.y, &right, right_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn renders_left_and_right() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut bar = StatusBar::new();
        bar.set_left("Esc");
        bar.set_right("ok");
        bar.render(&mut frame, area, &ComponentContext::default());
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "E");
        assert_eq!(buffer.cell((18, 0)).unwrap().symbol(), "o");
        assert_eq!(buffer.cell((19, 0)).unwrap().symbol(), "k");
    }
}
