use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::catalog::{CategoryFilter, Product};
use crate::components::Component;
use crate::overlay::NavigationHost;
use crate::storefront::{BannerState, Storefront};
use crate::theme::Palette;
use crate::ui::UiFrame;

pub(super) fn draw<H: NavigationHost>(frame: &mut UiFrame<'_>, area: Rect, app: &Storefront<H>) {
    let banner_height = if app.banner() == BannerState::Closed {
        0
    } else {
        1
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let palette = app.palette();

    let ctx = app.context().with_focus(app.home().search_focused);
    let mut search = app.home().search.clone();
    search.render(frame, chunks[0], &ctx);

    if app.banner() != BannerState::Closed {
        let mut style = Style::default().fg(palette.accent_alt);
        if app.banner() == BannerState::Closing {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(
            Paragraph::new("📺 شاهد شرح طريقة الطلب من المتجر  (x للإخفاء)").style(style),
            chunks[1],
        );
    }

    frame.render_widget(Paragraph::new(filter_tabs(app.home().filter, &palette)), chunks[2]);
    draw_sections(frame, chunks[3], app, &palette);
}

fn filter_tabs(current: CategoryFilter, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for filter in CategoryFilter::CYCLE {
        let style = if filter == current {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_sections<H: NavigationHost>(
    frame: &mut UiFrame<'_>,
    area: Rect,
    app: &Storefront<H>,
    palette: &Palette,
) {
    if let Some(err) = app.catalog_error() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("تعذر تحميل المنتجات", Style::default().fg(palette.error)),
                Line::styled(err.to_string(), Style::default().fg(palette.muted)),
            ]),
            area,
        );
        return;
    }

    let view = app.home_view();
    if view.is_empty() {
        frame.render_widget(
            Paragraph::new("🔍 لا توجد نتائج مطابقة").style(Style::default().fg(palette.muted)),
            area,
        );
        return;
    }

    let cursor = app.home().cursor;
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut index = 0;
    let sections: [(&str, &[&Product]); 3] = [
        ("التطبيقات", &view.programs),
        ("الألعاب", &view.games),
        ("الرواتب", &view.salaries),
    ];
    for (title, products) in sections {
        if products.is_empty() {
            continue;
        }
        lines.push(Line::styled(
            title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        for product in products {
            let selected = index == cursor;
            if selected {
                cursor_line = lines.len();
            }
            lines.push(product_line(product, selected, palette));
            index += 1;
        }
        lines.push(Line::raw(""));
    }

    let height = area.height as usize;
    let scroll = if height == 0 {
        0
    } else {
        cursor_line.saturating_sub(height - 1)
    };
    frame.render_widget(
        Paragraph::new(lines).scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        area,
    );
}

fn product_line(product: &Product, selected: bool, palette: &Palette) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let style = if selected {
        Style::default().fg(palette.fg).bg(palette.surface)
    } else {
        Style::default().fg(palette.fg)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(product.name_ar.clone(), style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", product.name), style.fg(palette.muted)),
    ])
}
