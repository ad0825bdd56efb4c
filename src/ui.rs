//! UiFrame: a thin wrapper around `ratatui::Frame` that clips every draw to
//! the visible area.
//!
//! Dialog and sheet rectangles are computed from the terminal size and can
//! land partly off-screen on tiny terminals; writing past the buffer would
//! panic. Views render through `UiFrame` so that never has to be checked at
//! each call site.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Render into a detached buffer; used by tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Apply `style` to every cell of `area`, keeping the symbols.
    pub fn restyle(&mut self, area: Rect, style: Style) {
        if let Some(clipped) = self.clip_rect(area) {
            self.buffer.set_style(clipped, style);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn render_outside_area_is_ignored() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.render_widget(Paragraph::new("xx"), Rect::new(10, 10, 2, 1));
        frame.render_widget(Paragraph::new("abcdef"), Rect::new(2, 1, 6, 1));
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "a");
        assert_eq!(buffer.cell((3, 1)).unwrap().symbol(), "b");
    }

    #[test]
    fn safe_set_string_truncates() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buffer = Buffer::empty(area);
        safe_set_string(&mut buffer, area, 1, 0, "hello", Style::default());
        assert_eq!(buffer.cell((1, 0)).unwrap().symbol(), "h");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), "e");
        safe_set_string(&mut buffer, area, 9, 0, "nope", Style::default());
    }
}
