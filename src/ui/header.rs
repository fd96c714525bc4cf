use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::animation::spinner;
use crate::app::App;
use crate::gateway::RadioState;

/// Render the application header bar
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {}", t.icon(theme::ICON_WIFI, theme::PLAIN_WIFI)),
            t.style_accent_bold(),
        ),
        Span::styled("airlink ", t.style_accent_bold()),
    ]);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };

    let radio = match app.radio {
        Some(RadioState::Enabled) => Span::styled("  Wi-Fi on", t.style_dim()),
        Some(RadioState::Disabled) => Span::styled(
            format!("  {}Wi-Fi off", t.icon(theme::ICON_WIFI_OFF, theme::PLAIN_WIFI_OFF)),
            t.style_warning(),
        ),
        None => Span::styled("  Wi-Fi …", t.style_dim()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(radio)).alignment(Alignment::Left),
        inner,
    );

    frame.render_widget(
        Paragraph::new(Line::from(status_spans(app, t))).alignment(Alignment::Right),
        inner,
    );
}

fn status_spans(app: &App, t: &Theme) -> Vec<Span<'static>> {
    let tick = app.animation.tick_count;
    let mut spans = Vec::new();

    if let Some(target) = app.pending_connect_target() {
        spans.push(Span::styled(
            format!("{} ", spinner::spinner_frame(tick)),
            t.style_accent(),
        ));
        spans.push(Span::styled("Connecting to ", t.style_dim()));
        spans.push(Span::styled(target.to_string(), t.style_accent()));
        spans.push(Span::styled("… ", t.style_dim()));
        return spans;
    }

    match app.active.as_ref() {
        Some(active) => {
            let icon = t.icon(theme::ICON_CONNECTED, theme::PLAIN_CONNECTED);
            spans.push(Span::styled(
                format!("{icon}{} ", spinner::pulse_frame(tick)),
                t.style_connected(),
            ));
            spans.push(Span::styled(
                active.ssid().unwrap_or(active.profile.name.as_str()).to_string(),
                t.style_connected(),
            ));
            if let Some(device) = &active.device {
                spans.push(Span::styled(format!(" ({device})"), t.style_dim()));
            }
            spans.push(Span::raw(" "));
        }
        None => spans.push(Span::styled("Disconnected ", t.style_dim())),
    }
    spans
}
