//! Modal overlays: alerts and the example picker

use crate::ui::theme::DEFAULT_THEME;
use crate::view::{Alert, AlertKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// A `width` x `height` rectangle centered in `area`, clamped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Render the oldest pending alert
pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert, remaining: usize) {
    let (title, color) = match alert.kind {
        AlertKind::Validation => (" Notice ", DEFAULT_THEME.secondary),
        AlertKind::Network => (" Connection Error ", DEFAULT_THEME.error),
        AlertKind::Compile => (" Error ", DEFAULT_THEME.error),
        AlertKind::Example => (" Examples ", DEFAULT_THEME.error),
    };

    let mut lines: Vec<Line> = alert
        .message
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(DEFAULT_THEME.fg))))
        .collect();
    lines.push(Line::default());
    let hint = if remaining > 1 {
        format!("↵ dismiss ({} more)", remaining - 1)
    } else {
        "↵ dismiss".to_string()
    };
    lines.push(Line::styled(hint, Style::default().fg(DEFAULT_THEME.comment)));

    let height = lines.len() as u16 + 2;
    let popup = centered(area, 60, height);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Render the example picker with the highlighted entry
pub fn render_example_picker(frame: &mut Frame, area: Rect, examples: &[String], selected: usize) {
    let height = (examples.len().max(1) as u16).saturating_add(2);
    let popup = centered(area, 40, height);

    let block = Block::default()
        .title(" Load Example ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(Clear, popup);

    if examples.is_empty() {
        let paragraph = Paragraph::new("(no examples configured)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, popup);
        return;
    }

    let items: Vec<ListItem> = examples
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let style = if idx == selected {
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(format!(" {} ", name)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), popup);
}
