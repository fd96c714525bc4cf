use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::animation::spinner;
use crate::app::App;

/// Render the active connection info dialog
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let width = 60_u16.min(area.width.saturating_sub(4));
    let height = 16_u16.min(area.height);
    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(
                format!(" {}", t.icon(theme::ICON_INFO, "")),
                t.style_accent(),
            ),
            Span::styled("Connection Info ", t.style_accent_bold()),
        ]))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());

    let mut lines: Vec<Line> = vec![Line::from("")];

    if let Some(active) = &app.active {
        lines.push(detail_line(t, "  Network", active.ssid().unwrap_or("?")));
        lines.push(detail_line(t, "  Profile", &active.profile.name));
        if let Some(entry) = app
            .entries
            .iter()
            .find(|e| e.ap.is_active)
            .filter(|e| e.ap.in_range())
        {
            let color = t.signal_color(entry.ap.signal);
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", "  Signal"), t.style_dim()),
                Span::styled(format!("{}%", entry.ap.signal), Style::default().fg(color)),
                Span::styled(
                    format!("  {}", signal_bar(entry.ap.signal)),
                    Style::default().fg(color),
                ),
            ]));
            lines.push(detail_line(t, "  Security", &entry.ap.security.to_string()));
        }
        lines.push(Line::from(""));
    }

    match (&app.detail, &app.detail_error) {
        (Some(d), _) => {
            lines.push(detail_line(t, "  Device", &format!("{} ({})", d.device, d.kind)));
            lines.push(detail_line(t, "  State", &d.state));
            lines.push(detail_line(t, "  MAC", &d.mac));
            lines.push(detail_line(t, "  IPv4", &or_dash(d.ipv4.map(|n| n.to_string()))));
            lines.push(detail_line(t, "  Gateway", &or_dash(d.gateway_v4.clone())));
            let dns = Some(d.dns.join(", ")).filter(|s| !s.is_empty());
            lines.push(detail_line(t, "  DNS", &or_dash(dns)));
            if let Some(v6) = d.ipv6 {
                lines.push(detail_line(t, "  IPv6", &v6.to_string()));
            }
            if let Some(gw6) = &d.gateway_v6 {
                lines.push(detail_line(t, "  Gateway6", gw6));
            }
        }
        (None, Some(err)) => {
            lines.push(Line::from(Span::styled(format!("  {err}"), t.style_error())));
        }
        (None, None) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", spinner::spinner_frame(app.animation.tick_count)),
                    t.style_accent(),
                ),
                Span::styled("Loading device details…", t.style_dim()),
            ]));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left),
        dialog,
    );
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "--".into())
}

/// Build a key-value detail line (owns its data)
fn detail_line(t: &Theme, label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), t.style_dim()),
        Span::styled(value.to_string(), t.style_default()),
    ])
}

/// Generate a text-based signal strength bar
fn signal_bar(strength: u8) -> String {
    let filled = (strength.min(100) as usize * 10) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_bar_is_ten_cells() {
        assert_eq!(signal_bar(0), "░░░░░░░░░░");
        assert_eq!(signal_bar(55), "█████░░░░░");
        assert_eq!(signal_bar(100), "██████████");
    }
}
