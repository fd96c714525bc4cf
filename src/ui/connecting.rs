use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::animation::spinner;
use crate::app::App;

pub fn render_connecting(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let target = app.pending_connect_target().unwrap_or_default();
    let dialog = super::centered_rect_fixed(50_u16.min(area.width.saturating_sub(4)), 7, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(" Connecting ", t.style_accent_bold()))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner::bar_frame(app.animation.tick_count)),
                t.style_accent(),
            ),
            Span::styled("Connecting to ", t.style_dim()),
            Span::styled(target.to_string(), t.style_accent_bold()),
            Span::styled("…", t.style_dim()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Esc]", t.style_key_hint()),
            Span::styled(" Continue in background", t.style_key_desc()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        dialog,
    );
}

pub fn render_result(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let Some(report) = &app.report else {
        return;
    };
    let dialog = super::centered_rect_fixed(56_u16.min(area.width.saturating_sub(4)), 8, area);
    frame.render_widget(Clear, dialog);

    let (title, style, icon) = if report.success {
        (
            " Connected ",
            t.style_connected(),
            t.icon(theme::ICON_CONNECTED, theme::PLAIN_CONNECTED),
        )
    } else {
        (
            " Connection Failed ",
            t.style_error(),
            t.icon(theme::ICON_ERROR, "[!] "),
        )
    };

    let block = Block::default()
        .title(Span::styled(title, style))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(style)
        .style(t.style_default());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(icon.to_string(), style),
            Span::styled(report.message.clone(), t.style_default()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", t.style_key_hint()),
            Span::styled(" Back to networks", t.style_key_desc()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        dialog,
    );
}
