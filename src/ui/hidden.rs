use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::app::{App, HiddenField};

/// Render the hidden network connection modal
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let width = 56_u16.min(area.width.saturating_sub(4));
    let height = 11_u16.min(area.height.saturating_sub(2));
    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let icon = t.icon(theme::ICON_HIDDEN, theme::PLAIN_HIDDEN);
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(format!(" {icon}"), t.style_accent()),
            Span::styled(" Connect to Hidden Network ", t.style_accent_bold()),
        ]))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());
    frame.render_widget(block, dialog);

    let field_area = |row: u16| Rect {
        x: dialog.x + 3,
        y: dialog.y + row,
        width: dialog.width.saturating_sub(6),
        height: 1,
    };

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice.clone(), t.style_warning())),
            field_area(1),
        );
    }

    let form = &app.hidden_form;
    form.ssid.render(
        frame,
        field_area(3),
        "SSID:     ",
        form.focus == HiddenField::Ssid,
        t,
    );
    form.password.render(
        frame,
        field_area(5),
        "Password: ",
        form.focus == HiddenField::Password,
        t,
    );

    let opt_area = Rect {
        x: dialog.x + 13,
        y: dialog.y + 6,
        width: dialog.width.saturating_sub(16),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled("(leave empty for open networks)", t.style_dim())),
        opt_area,
    );

    let hints = Line::from(vec![
        Span::styled("[Tab]", t.style_key_hint()),
        Span::styled(" Switch  ", t.style_key_desc()),
        Span::styled("[Enter]", t.style_key_hint()),
        Span::styled(" Connect  ", t.style_key_desc()),
        Span::styled("[Esc]", t.style_key_hint()),
        Span::styled(" Cancel ", t.style_key_desc()),
    ]);
    frame.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        field_area(height.saturating_sub(3)),
    );
}
