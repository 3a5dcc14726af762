//! Stage pane: the tab bar and the active tab's panel

use crate::ui::theme::DEFAULT_THEME;
use crate::view::{TabId, Tone, ViewState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Tabs},
    Frame,
};

/// Render the tab bar and the panel of the active tab
pub fn render_stage_pane(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_tab_bar(frame, chunks[0], view.active_tab(), is_focused);
    render_panel(frame, chunks[1], view, is_focused, scroll_offset);
}

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: TabId, is_focused: bool) {
    let titles: Vec<Line> = TabId::ALL
        .iter()
        .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_focused)),
        )
        .style(Style::default().fg(DEFAULT_THEME.comment))
        .highlight_style(
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let tab = view.active_tab();
    let panel = view.active_panel();

    let title_style = match panel.tone {
        Tone::Error => Style::default().fg(DEFAULT_THEME.error),
        Tone::Success => Style::default().fg(DEFAULT_THEME.success),
        Tone::Normal => Style::default(),
    };
    let block = Block::default()
        .title(Line::styled(format!(" {} ", tab.title()), title_style))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if panel.text == view.placeholders().for_tab(tab) {
        *scroll_offset = 0;
        let paragraph = Paragraph::new(panel.text.as_str())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let text_style = match panel.tone {
        Tone::Error => Style::default().fg(DEFAULT_THEME.error),
        Tone::Success => Style::default().fg(DEFAULT_THEME.success),
        Tone::Normal => Style::default().fg(DEFAULT_THEME.fg),
    };

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = panel
        .text
        .lines()
        .map(|line| ListItem::new(line).style(text_style))
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
