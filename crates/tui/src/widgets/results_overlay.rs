//! Results overlay widget.
//!
//! Renders the dropdown of candidates beneath the search box and resolves
//! pointer positions back to candidate rows. The overlay is only ever drawn
//! for a settled response; an empty page gets an explicit "No results found"
//! state rather than disappearing.

use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use tk_protocol::Candidate;

/// Render the overlay into `area`.
///
/// # Arguments
/// * `frame` - The frame to render into
/// * `area` - The overlay area (including its border)
/// * `candidates` - The settled result page, service order preserved
/// * `selected` - The highlighted row, if any
/// * `total_results` - Total matches reported by the service
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    candidates: &[Candidate],
    selected: Option<usize>,
    total_results: u64,
) {
    let title = format!("Results ({} matches)", total_results);
    let block = Block::default().borders(Borders::ALL).title(title);

    if candidates.is_empty() {
        let paragraph = Paragraph::new("No results found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = candidates
        .iter()
        .map(|candidate| ListItem::new(Line::from(candidate.name.clone())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    list_state.select(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Map a pointer position to the candidate row it landed on.
///
/// Rows sit inside the overlay border, one candidate per line, top to
/// bottom. Positions on the border, past the last candidate, or outside the
/// overlay resolve to `None`.
pub fn candidate_row_at(
    area: Rect,
    candidates_len: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    if !area.contains(Position { x: column, y: row }) {
        return None;
    }
    // Exclude the border cells.
    if row <= area.y || row + 1 >= area.y + area.height {
        return None;
    }
    if column <= area.x || column + 1 >= area.x + area.width {
        return None;
    }

    let index = (row - area.y - 1) as usize;
    (index < candidates_len).then_some(index)
}
