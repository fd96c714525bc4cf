use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::centered_rect_fixed;
use crate::ui::theme::Theme;

/// A y/n confirmation dialog centered in `area`
pub fn render(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let width = 50_u16.min(area.width.saturating_sub(4));
    let dialog = centered_rect_fixed(width, 7, area);
    f.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Span::styled(format!(" {title} "), theme.style_warning()))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.style_warning())
        .style(theme.style_default());

    let inner = block.inner(dialog);
    f.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let msg = Paragraph::new(Line::from(Span::styled(message, theme.style_default())))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(msg, chunks[1]);

    let actions = Line::from(vec![
        Span::styled(" y ", theme.style_key_hint()),
        Span::styled("Yes ", theme.style_key_desc()),
        Span::styled("│", theme.style_border()),
        Span::styled(" n ", theme.style_key_hint()),
        Span::styled("No ", theme.style_key_desc()),
    ]);
    f.render_widget(
        Paragraph::new(actions).alignment(Alignment::Center),
        chunks[2],
    );
}
