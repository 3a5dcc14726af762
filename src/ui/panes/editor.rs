//! Source editor pane
//!
//! Shows the [`SourceDocument`] with line numbers, light syntax highlighting for
//! the service's language and the cursor line highlighted. The scroll offset
//! follows the cursor so it always stays visible.

use crate::ui::theme::DEFAULT_THEME;
use crate::view::SourceDocument;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the `{:4} ` line number gutter
const GUTTER_WIDTH: u16 = 5;

/// Simple syntax highlighting, one line at a time
fn highlight_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Comments run to end of line
        if c == '/' && chars.get(i + 1).is_some_and(|(_, next)| *next == '/') {
            flush_word(&mut spans, &mut current_word);
            spans.push(Span::styled(
                &line[byte_idx..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' {
            flush_word(&mut spans, &mut current_word);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            let end_byte = chars
                .get(end + 1)
                .map_or(line.len(), |(idx, _)| *idx)
                .min(line.len());
            spans.push(Span::styled(
                &line[byte_idx..end_byte],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end + 1;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word);
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String) {
    if !word.is_empty() {
        let style = word_style(word);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn word_style(word: &str) -> Style {
    match word {
        "let" | "print" | "if" | "else" | "for" | "to" | "while" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the source editor
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    document: &SourceDocument,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    // split keeps a trailing empty line so the cursor can sit on it
    let lines: Vec<&str> = document.text().split('\n').collect();
    let (cursor_line, cursor_col) = document.cursor_position();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    if cursor_line < *scroll_offset {
        *scroll_offset = cursor_line;
    } else if cursor_line >= *scroll_offset + visible_height {
        *scroll_offset = cursor_line + 1 - visible_height;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = idx == cursor_line;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line);
            if is_current {
                for span in &mut content.spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);

    if is_focused {
        let max_x = area.right().saturating_sub(2);
        let x = (area.x + 1 + GUTTER_WIDTH).saturating_add(cursor_col as u16).min(max_x);
        let y = area.y + 1 + (cursor_line - *scroll_offset) as u16;
        frame.set_cursor_position((x, y));
    }
}
