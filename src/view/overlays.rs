use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::clipboard::CopyFeedback;
use crate::components::{Component, DialogAnchor, DialogOverlayComponent};
use crate::overlay::{NavigationHost, OverlayKind};
use crate::storefront::{CopyTarget, Storefront};
use crate::theme::Palette;
use crate::ui::UiFrame;

/// Draw one overlay. Overlays still visible after deactivation are drawn
/// faded until their hide timer fires.
pub(super) fn draw<H: NavigationHost>(
    frame: &mut UiFrame<'_>,
    area: Rect,
    app: &Storefront<H>,
    kind: OverlayKind,
) {
    let closing = !app.overlays().is_active(kind);
    let ctx = app.context().with_overlay(true);
    let palette = app.palette();
    match kind {
        OverlayKind::Salary => {
            let Some(product) = app.salary_product() else {
                return;
            };
            let dialog = DialogOverlayComponent::new(format!(" {} ", product.name_ar))
                .with_size(64, 13)
                .with_closing(closing);
            let inner = dialog.render(frame, area, &ctx);
            let mut lines = vec![Line::raw(product.description.clone())];
            if let Some(note) = product.note() {
                lines.push(Line::styled(
                    format!("📝 {note}"),
                    Style::default().fg(palette.accent_alt),
                ));
            }
            lines.push(Line::raw(""));
            match &product.withdraw_link {
                Some(reference) => lines.push(Line::from(vec![
                    Span::raw("رابط السحب: "),
                    Span::styled(
                        reference.clone(),
                        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    copy_badge(app, CopyTarget::Withdraw, &palette),
                ])),
                None => lines.push(Line::styled(
                    "لا يوجد رابط سحب لهذا البرنامج",
                    Style::default().fg(palette.muted),
                )),
            }
            lines.push(Line::raw(""));
            let tutorial = if product.tutorial_link().is_some() {
                "▶️ شاهد فيديو الشرح (v)"
            } else {
                "💬 اطلب فيديو الشرح عبر واتساب (v)"
            };
            lines.push(Line::styled(tutorial, Style::default().fg(palette.accent)));
            lines.push(Line::styled(
                "📞 تواصل مع المتجر (w)",
                Style::default().fg(palette.success),
            ));
            render_body(frame, inner, lines);
        }
        OverlayKind::Order => {
            let Some((product, package)) = app.selected_package() else {
                return;
            };
            let dialog = DialogOverlayComponent::new(" إتمام الطلب ")
                .with_size(60, 14)
                .with_closing(closing);
            let inner = dialog.render(frame, area, &ctx);
            let summary = app.composer().selection_summary(product, package);
            let mut lines = vec![Line::styled(
                "الفئة المختارة:",
                Style::default().fg(palette.muted),
            )];
            lines.extend(summary.lines().map(|l| Line::raw(l.to_string())));
            let text_height = lines.len() as u16 + 1;
            render_body(frame, inner, lines);

            let input_area = Rect {
                y: inner.y.saturating_add(text_height),
                height: 3,
                ..inner
            };
            let mut input = app.order_input().clone();
            input.set_shift(app.order_input_shift());
            input.render(frame, input_area, &ctx.with_focus(!closing));
            if app.order_input().invalid() {
                let hint = Rect {
                    y: input_area.y.saturating_add(3),
                    height: 1,
                    ..inner
                };
                frame.render_widget(
                    Paragraph::new("الرجاء إدخال Player ID").style(Style::default().fg(palette.error)),
                    hint,
                );
            }
        }
        OverlayKind::Reminder => {
            let dialog = DialogOverlayComponent::new(" ⚠️ تنبيه ")
                .with_size(56, 9)
                .with_dim_backdrop(kind.locks_scroll())
                .with_closing(closing);
            let inner = dialog.render(frame, area, &ctx);
            let action = if app.session().has_pending_message() {
                "سيتم فتح واتساب مع رسالة طلبك جاهزة."
            } else {
                "سيتم فتح محادثة واتساب مع المتجر."
            };
            render_body(
                frame,
                inner,
                vec![
                    Line::raw(action),
                    Line::raw("لا تنسَ الضغط على إرسال بعد فتح المحادثة."),
                    Line::raw(""),
                    Line::styled(
                        "Enter متابعة  •  Esc إلغاء",
                        Style::default().fg(palette.accent),
                    ),
                ],
            );
        }
        OverlayKind::Payment => {
            let height = app.payment_methods().len() as u16 * 2 + 4;
            let dialog = DialogOverlayComponent::new(" 💳 طرق الدفع ")
                .with_size(area.width, height)
                .with_anchor(DialogAnchor::Bottom)
                .with_closing(closing);
            let inner = dialog.render(frame, area, &ctx);
            let mut lines = Vec::new();
            for (i, method) in app.payment_methods().iter().enumerate() {
                let selected = i == app.payment_cursor();
                let marker = if selected { "▶ " } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(
                        method.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
                let mut account = vec![
                    Span::raw("    "),
                    Span::styled(method.account.clone(), Style::default().fg(palette.fg)),
                ];
                if selected {
                    account.push(Span::raw("  "));
                    account.push(copy_badge(app, CopyTarget::Payment, &palette));
                }
                lines.push(Line::from(account));
            }
            render_body(frame, inner, lines);
        }
    }
}

fn copy_badge<H: NavigationHost>(
    app: &Storefront<H>,
    target: CopyTarget,
    palette: &Palette,
) -> Span<'static> {
    let feedback = app.copy_feedback(target);
    let color = match feedback {
        CopyFeedback::Idle => palette.accent,
        CopyFeedback::Copied => palette.success,
        CopyFeedback::Failed => palette.error,
    };
    Span::styled(
        format!("[{}]", feedback.label()),
        Style::default().fg(color),
    )
}

fn render_body(frame: &mut UiFrame<'_>, area: Rect, lines: Vec<Line<'static>>) {
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
