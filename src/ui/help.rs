use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::theme::Theme;
use crate::app::App;
use crate::config::KeysConfig;

/// Keybinding entries: (key, description), following the configured bindings
fn keybindings(keys: &KeysConfig) -> Vec<(String, &'static str)> {
    vec![
        ("↑ / k".into(), "Move up"),
        ("↓ / j".into(), "Move down"),
        ("g / G".into(), "Go to top / bottom"),
        ("Enter".into(), "Connect / disconnect selected"),
        (keys.refresh.to_string(), "Rescan"),
        (keys.filter.to_string(), "Filter networks"),
        (keys.disconnect.to_string(), "Disconnect active network"),
        (keys.forget.to_string(), "Forget selected network"),
        (keys.info.to_string(), "Active connection info"),
        (keys.profiles.to_string(), "Saved networks"),
        (keys.hidden_connect.to_string(), "Connect to hidden network"),
        (keys.toggle_hidden.to_string(), "Show / hide unnamed networks"),
        (keys.toggle_wifi.to_string(), "Turn Wi-Fi on / off"),
        ("Ctrl+H".into(), "Show / hide password"),
        ("Tab".into(), "Switch fields (in dialogs)"),
        ("Esc".into(), "Close dialog / cancel"),
        (keys.help.to_string(), "Toggle this help"),
        (keys.quit.to_string(), "Quit"),
    ]
}

/// Render the help overlay
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let bindings = keybindings(app.keys());
    let width = 52_u16.min(area.width.saturating_sub(4));
    let height = (bindings.len() as u16 + 5).min(area.height.saturating_sub(2));

    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(" Keybindings ", t.style_accent_bold()))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_accent())
        .style(t.style_default());

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (key, desc) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<12}"), t.style_key_hint()),
            Span::styled(desc, t.style_default()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", t.style_dim()),
        Span::styled(app.keys().help.to_string(), t.style_key_hint()),
        Span::styled(" or ", t.style_dim()),
        Span::styled("Esc", t.style_key_hint()),
        Span::styled(" to close", t.style_dim()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_follows_rebound_keys() {
        let keys = KeysConfig {
            refresh: 's',
            ..KeysConfig::default()
        };
        let bindings = keybindings(&keys);
        assert!(bindings.iter().any(|(k, d)| k == "s" && *d == "Rescan"));
        assert!(!bindings.iter().any(|(k, _)| k == "r"));
    }
}
