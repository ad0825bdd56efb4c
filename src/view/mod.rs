//! Drawing the storefront.
//!
//! Views only read from [`Storefront`]; everything they show is derived from
//! its state on every frame.

mod details;
mod home;
mod overlays;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::components::{Component, DebugLogComponent, StatusBar, debug_log::global_debug_log};
use crate::keybindings::Action;
use crate::overlay::{NavigationHost, OverlayKind};
use crate::storefront::{Screen, Storefront};
use crate::ui::UiFrame;

pub fn draw<H: NavigationHost>(frame: &mut UiFrame<'_>, app: &Storefront<H>) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let ctx = app.context();
    let palette = ctx.palette();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, chunks[0], app);
    match app.screen() {
        Screen::Home => home::draw(frame, chunks[1], app),
        Screen::Details(details) => details::draw(frame, chunks[1], app, details),
    }

    let body = Rect {
        height: chunks[1].height + chunks[2].height,
        ..chunks[1]
    };
    for kind in app.overlays().paint_order() {
        overlays::draw(frame, body, app, kind);
    }

    if app.debug_log_visible()
        && let Some(handle) = global_debug_log()
    {
        let height = (area.height / 2).max(3);
        let rect = Rect {
            y: area.y + area.height.saturating_sub(height),
            height,
            ..area
        };
        DebugLogComponent::new(handle).render(frame, rect, &ctx);
    }

    let mut status = StatusBar::new();
    status.set_left(app.keys().hints(&hint_actions(app)));
    if let Some(right) = app.notice().or(app.catalog_error()) {
        status.set_right(right);
    }
    status.render(frame, chunks[2], &ctx);
}

fn draw_header<H: NavigationHost>(frame: &mut UiFrame<'_>, area: Rect, app: &Storefront<H>) {
    let palette = app.palette();
    let line = Line::from(vec![
        Span::styled(
            " XP Store ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "شحن التطبيقات والألعاب",
            Style::default().fg(palette.muted),
        ),
        Span::raw("  "),
        Span::raw(app.theme().icon()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.surface)),
        area,
    );
}

fn hint_actions<H: NavigationHost>(app: &Storefront<H>) -> Vec<Action> {
    use Action::*;
    match app.overlays().top() {
        Some(OverlayKind::Order) => vec![Accept, Quit],
        Some(OverlayKind::Reminder) => vec![Accept, Back],
        Some(OverlayKind::Salary) => vec![Copy, OpenTutorial, ContactStore, Back],
        Some(OverlayKind::Payment) => vec![Up, Down, Copy, Back],
        None => match app.screen() {
            Screen::Home if app.home().search_focused => vec![Accept, NextFilter],
            Screen::Home => vec![FocusSearch, NextFilter, Accept, OpenPayment, ToggleTheme, Quit],
            Screen::Details(_) => vec![Accept, OpenPayment, Back, Quit],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BundledCatalog, Catalog};
    use crate::config::StoreConfig;
    use crate::overlay::SessionHistory;
    use crate::prefs::PreferenceStore;
    use ratatui::buffer::Buffer;

    fn app() -> Storefront {
        let (catalog, _) = Catalog::load_from(&BundledCatalog);
        Storefront::new(
            catalog,
            &StoreConfig::default(),
            PreferenceStore::in_memory(),
            SessionHistory::new(),
        )
    }

    fn render(app: &Storefront, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        draw(&mut frame, app);
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer.cell((x, y)).map_or(" ", |c| c.symbol()));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn home_lists_bundled_products() {
        let out = render(&app(), 80, 30);
        assert!(out.contains("XP Store"));
        assert!(out.contains("PUBG Mobile"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = app();
        app.open_payment();
        render(&app, 3, 2);
        render(&app, 0, 0);
    }

    #[test]
    fn details_and_order_overlay_render() {
        let mut app = app();
        app.show_details("pubg");
        assert!(app.select_package(0));
        let out = render(&app, 90, 30);
        assert!(out.contains("Player ID"));
    }
}
