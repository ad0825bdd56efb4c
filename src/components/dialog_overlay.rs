use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::components::ComponentContext;
use crate::ui::UiFrame;

/// Where the dialog sits in the available area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogAnchor {
    #[default]
    Center,
    /// Full width along the bottom edge, like a mobile bottom sheet.
    Bottom,
}

/// Frame shared by every overlay: backdrop, cleared box, border and title.
/// The overlay content is drawn by the caller into [`render`](Self::render)'s
/// returned inner rect.
#[derive(Debug, Clone)]
pub struct DialogOverlayComponent {
    title: String,
    width: u16,
    height: u16,
    anchor: DialogAnchor,
    dim_backdrop: bool,
    closing: bool,
}

impl DialogOverlayComponent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 64,
            height: 14,
            anchor: DialogAnchor::Center,
            dim_backdrop: true,
            closing: false,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_anchor(mut self, anchor: DialogAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_dim_backdrop(mut self, dim: bool) -> Self {
        self.dim_backdrop = dim;
        self
    }

    /// A closing dialog is drawn faded for the rest of its exit animation.
    pub fn with_closing(mut self, closing: bool) -> Self {
        self.closing = closing;
        self
    }

    /// Clamp dialog size to the available area to avoid drawing outside the buffer
    /// when the terminal is smaller than the preferred minimums.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        match self.anchor {
            DialogAnchor::Center => Rect {
                x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
                y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
                width,
                height,
            },
            DialogAnchor::Bottom => Rect {
                x: area.x,
                y: area.y.saturating_add(area.height.saturating_sub(height)),
                width: area.width,
                height,
            },
        }
    }

    /// Draw the frame and return the content rect inside the border.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) -> Rect {
        if area.width == 0 || area.height == 0 {
            return Rect::default();
        }
        let palette = ctx.palette();
        if self.dim_backdrop && !self.closing {
            frame.restyle(area, Style::default().add_modifier(Modifier::DIM));
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let border = if self.closing {
            palette.muted
        } else {
            palette.accent
        };
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(palette.surface).fg(palette.fg));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        if self.closing {
            frame.restyle(rect, Style::default().add_modifier(Modifier::DIM));
        }
        Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            ..inner
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_for_clamps_sizes() {
        let dlg = DialogOverlayComponent::new("t");
        let tiny = Rect::new(0, 0, 10, 2);
        let r = dlg.rect_for(tiny);
        assert!(r.width >= 1 && r.width <= 10);
        assert!(r.height >= 1 && r.height <= 2);

        let big = Rect::new(0, 0, 100, 40);
        let r2 = dlg.rect_for(big);
        assert_eq!(r2.width, 64);
        assert_eq!(r2.x, 18);
    }

    #[test]
    fn bottom_sheet_hugs_bottom_edge() {
        let dlg = DialogOverlayComponent::new("t")
            .with_size(80, 10)
            .with_anchor(DialogAnchor::Bottom);
        let area = Rect::new(0, 0, 50, 30);
        let r = dlg.rect_for(area);
        assert_eq!(r.y + r.height, 30);
        assert_eq!(r.width, 50);
    }
}
