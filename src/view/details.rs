use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::overlay::NavigationHost;
use crate::pricing::MISSING_PRICE;
use crate::storefront::{DetailsScreen, Storefront};
use crate::ui::UiFrame;

pub(super) fn draw<H: NavigationHost>(
    frame: &mut UiFrame<'_>,
    area: Rect,
    app: &Storefront<H>,
    details: &DetailsScreen,
) {
    let palette = app.palette();
    let (product, cursor) = match (details, app.current_product()) {
        (DetailsScreen::Ready { cursor, .. }, Some(product)) => (product, *cursor),
        (DetailsScreen::Missing { requested }, _) => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled("المنتج غير موجود", Style::default().fg(palette.error)),
                    Line::styled(requested.clone(), Style::default().fg(palette.muted)),
                ]),
                area,
            );
            return;
        }
        (DetailsScreen::Ready { .. }, None) => return,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                product.name_ar.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", product.name), Style::default().fg(palette.muted)),
        ]),
        Line::raw(product.description.clone()),
    ];
    if let Some(note) = product.note() {
        lines.push(Line::styled(
            format!("📝 {note}"),
            Style::default().fg(palette.accent_alt),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "اختر الفئة",
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let header = lines.len();
    let selected = app.session().selected_package();
    for (i, package) in product.packages.iter().enumerate() {
        let price = app.composer().price(package);
        let marker = match (i == cursor, selected == Some(i)) {
            (_, true) => "✓ ",
            (true, false) => "▶ ",
            _ => "  ",
        };
        let style = if i == cursor {
            Style::default().fg(palette.fg).bg(palette.surface)
        } else {
            Style::default().fg(palette.fg)
        };
        let usd = if price.usd == MISSING_PRICE {
            MISSING_PRICE.to_string()
        } else {
            format!("${}", price.usd)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.accent)),
            Span::styled(format!("{:<12}", package.amount), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} ريال", price.yer), style),
            Span::styled(format!("  {usd}"), style.fg(palette.success)),
        ]));
    }
    if product.packages.is_empty() {
        lines.push(Line::styled(
            "لا توجد فئات متاحة حالياً",
            Style::default().fg(palette.muted),
        ));
    }

    let height = area.height as usize;
    let cursor_line = header + cursor;
    let scroll = if height == 0 {
        0
    } else {
        cursor_line.saturating_sub(height - 1)
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        area,
    );
}
