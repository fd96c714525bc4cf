use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::theme::{self, Theme};
use crate::app::App;

/// Render the saved Wi-Fi profiles
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let profiles = app.profiles_sorted();
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" Saved Networks ({}) ", profiles.len()),
            t.style_accent_bold(),
        )))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_border())
        .style(t.style_default());

    if profiles.is_empty() {
        let para = Paragraph::new("No saved Wi-Fi networks.")
            .block(block)
            .style(t.style_dim())
            .alignment(Alignment::Center);
        frame.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = profiles
        .iter()
        .enumerate()
        .map(|(idx, profile)| {
            let active = app.is_active_profile(profile);
            let selector = if idx == app.profile_cursor {
                Span::styled(
                    format!("{} ", t.icon(theme::ICON_ARROW_RIGHT, theme::PLAIN_ARROW)),
                    t.style_accent(),
                )
            } else {
                Span::raw("  ")
            };
            let name_style = if active {
                t.style_connected()
            } else {
                t.style_default()
            };
            let mut spans = vec![
                selector,
                Span::styled(format!("{:<28}", profile.name), name_style),
            ];
            if let Some(ssid) = profile.ssid.as_deref().filter(|s| *s != profile.name) {
                spans.push(Span::styled(format!(" SSID {ssid}"), t.style_dim()));
            }
            if active {
                let device = profile.device.as_deref().unwrap_or("connected");
                spans.push(Span::styled(format!("  ● {device}"), t.style_connected()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(t.style_selected());
    let mut state = ListState::default();
    state.select(Some(app.profile_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}
