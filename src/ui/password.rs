use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::app::App;

/// Render the password input modal dialog
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let ssid = app
        .selected
        .as_ref()
        .map_or("", |e| e.ap.display_ssid());
    let width = 56_u16.min(area.width.saturating_sub(4));
    let height = 9_u16.min(area.height.saturating_sub(2));
    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(
                format!(" {}", t.icon(theme::ICON_LOCK, theme::PLAIN_LOCK)),
                t.style_accent(),
            ),
            Span::styled(format!("Connect to \"{ssid}\" "), t.style_accent_bold()),
        ]))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());
    frame.render_widget(block, dialog);

    if let Some(notice) = &app.notice {
        let notice_area = Rect {
            x: dialog.x + 3,
            y: dialog.y + 1,
            width: dialog.width.saturating_sub(6),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(notice.clone(), t.style_warning())),
            notice_area,
        );
    }

    let input_area = Rect {
        x: dialog.x + 3,
        y: dialog.y + 3,
        width: dialog.width.saturating_sub(6),
        height: 1,
    };
    app.password.render(frame, input_area, "Password: ", true, t);

    let toggle_hint = if app.password.is_revealed() {
        " Hide"
    } else {
        " Show"
    };
    let hint_area = Rect {
        x: dialog.x + 3,
        y: dialog.y + height.saturating_sub(3),
        width: dialog.width.saturating_sub(6),
        height: 1,
    };
    let hints = Line::from(vec![
        Span::styled("[Enter]", t.style_key_hint()),
        Span::styled(" Connect  ", t.style_key_desc()),
        Span::styled("[Esc]", t.style_key_hint()),
        Span::styled(" Cancel  ", t.style_key_desc()),
        Span::styled("[Ctrl+H]", t.style_key_hint()),
        Span::styled(toggle_hint, t.style_key_desc()),
    ]);
    frame.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        hint_area,
    );
}
