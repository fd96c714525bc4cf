use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{self, Theme};
use crate::animation::spinner;
use crate::app::App;
use crate::merge::NetworkEntry;

const SSID_WIDTH: usize = 28;

/// Render the merged network list
pub fn render(frame: &mut Frame, app: &App, t: &Theme, area: Rect) {
    let mut title = vec![Span::styled(format!(" {} ", app.list_title()), t.style_accent_bold())];
    if app.scanning {
        title.push(Span::styled(
            format!(
                "{}{} ",
                t.icon(theme::ICON_SCAN, ""),
                spinner::spinner_frame(app.animation.tick_count)
            ),
            t.style_accent(),
        ));
    }

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(t.border_type)
        .border_style(t.style_border())
        .style(t.style_default());
    if let Some(line) = filter_line(app, t) {
        block = block.title_bottom(line);
    }

    if app.entries.is_empty() {
        let msg = if !app.wifi_enabled() {
            format!("Press [{}] to turn Wi-Fi on.", app.keys().toggle_wifi)
        } else if app.scanning {
            "Scanning for networks…".to_string()
        } else if app.filter.active_query().is_some() {
            "No networks match the filter.".to_string()
        } else {
            format!("No networks found. Press [{}] to rescan.", app.keys().refresh)
        };
        let para = Paragraph::new(msg)
            .block(block)
            .style(t.style_dim())
            .alignment(Alignment::Center);
        frame.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| ListItem::new(row(entry, idx == app.list_cursor, app, t)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(t.style_selected())
        .highlight_symbol("");

    let mut state = ListState::default();
    state.select(Some(app.list_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row<'a>(entry: &'a NetworkEntry, selected: bool, app: &App, t: &Theme) -> Line<'a> {
    let ap = &entry.ap;

    let selector = if selected {
        Span::styled(
            format!("{} ", t.icon(theme::ICON_ARROW_RIGHT, theme::PLAIN_ARROW)),
            t.style_accent(),
        )
    } else {
        Span::raw("  ")
    };

    let status_dot = if ap.is_active {
        Span::styled(
            format!("{} ", spinner::pulse_frame(app.animation.tick_count)),
            t.style_connected(),
        )
    } else {
        Span::raw("  ")
    };

    let ssid_style = if ap.is_active {
        t.style_connected()
    } else if ap.is_hidden() || !ap.in_range() {
        t.style_dim()
    } else {
        t.style_default()
    };
    let ssid = Span::styled(fit(ap.display_ssid(), SSID_WIDTH), ssid_style);

    let color = t.signal_color(ap.signal);
    let signal = Span::styled(t.signal_icon(ap.signal).to_string(), Style::default().fg(color));
    let pct = if ap.in_range() {
        Span::styled(format!("{:>3}%", ap.signal), Style::default().fg(color))
    } else {
        Span::styled("  --", t.style_dim())
    };

    let sec_style = if ap.security.is_open() {
        t.style_warning()
    } else {
        t.style_dim()
    };
    let lock = Span::styled(format!("{} ", t.lock_icon(ap.security)), sec_style);
    let security = Span::styled(format!("{:<8}", ap.security.to_string()), sec_style);

    let saved = if ap.is_known {
        Span::styled(t.icon(theme::ICON_SAVED, theme::PLAIN_SAVED), t.style_accent())
    } else {
        Span::raw(" ")
    };

    Line::from(vec![
        selector,
        status_dot,
        ssid,
        Span::raw(" "),
        signal,
        pct,
        Span::raw(" "),
        lock,
        security,
        saved,
    ])
}

fn filter_line(app: &App, t: &Theme) -> Option<Line<'static>> {
    if !app.filter.editing && app.filter.active_query().is_none() {
        return None;
    }
    let mut spans = vec![
        Span::styled(format!(" {} ", app.keys().filter), t.style_key_hint()),
        Span::styled(app.filter.query.clone(), t.style_default()),
    ];
    if app.filter.editing && app.animation.cursor_visible() {
        spans.push(Span::styled("█", t.style_accent()));
    }
    spans.push(Span::raw(" "));
    Some(Line::from(spans))
}

/// Pad or truncate to exactly `width` display columns
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{s}{}", " ".repeat(width - s.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
