use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::app::{App, Screen, StatusKind};

/// Bottom row: the transient status message if any, otherwise key hints for the current screen
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => t.style_accent(),
            StatusKind::Success => t.style_connected(),
            StatusKind::Error => t.style_error(),
        };
        let para = Paragraph::new(Line::from(Span::styled(status.text.clone(), style)))
            .alignment(Alignment::Center);
        frame.render_widget(para, area);
        return;
    }

    let k = app.keys();
    let hints = if app.show_help {
        vec![
            key(t, k.help.to_string()),
            desc(t, "Close "),
            key(t, "Esc"),
            desc(t, "Close"),
        ]
    } else {
        match app.screen {
            Screen::NetworksList if app.filter.editing => vec![
                key(t, "Enter"),
                desc(t, "Keep filter "),
                key(t, "Esc"),
                desc(t, "Clear"),
            ],
            Screen::NetworksList => vec![
                key(t, "↑↓/jk"),
                desc(t, "Navigate "),
                key(t, "Enter"),
                desc(t, "Connect "),
                key(t, k.refresh.to_string()),
                desc(t, "Scan "),
                key(t, k.filter.to_string()),
                desc(t, "Filter "),
                key(t, k.profiles.to_string()),
                desc(t, "Saved "),
                key(t, k.help.to_string()),
                desc(t, "Help "),
                key(t, k.quit.to_string()),
                desc(t, "Quit"),
            ],
            Screen::KnownProfilesList => vec![
                key(t, "Enter"),
                desc(t, "Connect "),
                key(t, k.forget.to_string()),
                desc(t, "Forget "),
                key(t, k.refresh.to_string()),
                desc(t, "Refresh "),
                key(t, "Esc"),
                desc(t, "Back"),
            ],
            Screen::PasswordInput => vec![
                key(t, "Enter"),
                desc(t, "Submit "),
                key(t, "Esc"),
                desc(t, "Cancel "),
                key(t, "Ctrl+H"),
                desc(t, "Toggle visibility"),
            ],
            Screen::HiddenSsidInput => vec![
                key(t, "Tab"),
                desc(t, "Switch field "),
                key(t, "Enter"),
                desc(t, "Connect "),
                key(t, "Esc"),
                desc(t, "Cancel"),
            ],
            Screen::Connecting => vec![
                Span::styled("Please wait… ", t.style_dim()),
                key(t, "Esc"),
                desc(t, "Background"),
            ],
            Screen::ConnectionResult => vec![key(t, "Enter"), desc(t, "Close")],
            Screen::ActiveConnectionInfo => vec![
                key(t, k.refresh.to_string()),
                desc(t, "Refresh "),
                key(t, "Esc"),
                desc(t, "Close"),
            ],
            Screen::ConfirmDisconnect
            | Screen::ConfirmForget
            | Screen::ConfirmOpenNetworkConnect => {
                vec![key(t, "y"), desc(t, "Yes "), key(t, "n"), desc(t, "No")]
            }
        }
    };

    let para = Paragraph::new(Line::from(hints)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn key(t: &Theme, k: impl Into<String>) -> Span<'static> {
    Span::styled(format!(" [{}] ", k.into()), t.style_key_hint())
}

fn desc(t: &Theme, d: &'static str) -> Span<'static> {
    Span::styled(d, t.style_key_desc())
}
