//! Search results table
//!
//! Renders the current page slice of the result set with selection
//! markers, and owns the per-result presentation state: pagination, row
//! cursor, and the selection set. Rows never mutate the underlying
//! profiles - this is display plus click dispatch only.

use crate::model::pagination::Pagination;
use crate::model::profile::{format_count, InfluencerProfile};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Result-set presentation state
#[derive(Default)]
pub struct ResultsState {
    pub results: Vec<InfluencerProfile>,
    pub pagination: Pagination,
    /// Row cursor within the visible page slice
    pub cursor: usize,
    /// Selected usernames; ephemeral, never persisted
    pub selected: HashSet<String>,
    /// Whether a search has completed at least once
    pub has_searched: bool,
}

impl ResultsState {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            pagination: Pagination::new(),
            cursor: 0,
            selected: HashSet::new(),
            has_searched: false,
        }
    }

    /// Replace the result set (new search): page 1, cursor reset,
    /// selection cleared.
    pub fn set_results(&mut self, results: Vec<InfluencerProfile>) {
        self.results = results;
        self.pagination.reset();
        self.cursor = 0;
        self.selected.clear();
        self.has_searched = true;
    }

    /// Empty the result set (failed search or teardown)
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.cursor = 0;
        self.selected.clear();
    }

    /// The profiles on the current page
    pub fn visible(&self) -> &[InfluencerProfile] {
        let range = self.pagination.page_range(self.results.len());
        &self.results[range]
    }

    /// The profile under the cursor
    pub fn focused(&self) -> Option<&InfluencerProfile> {
        self.visible().get(self.cursor.min(self.visible().len().saturating_sub(1)))
    }

    /// Selected profiles in result-set order
    pub fn selected_profiles(&self) -> Vec<InfluencerProfile> {
        self.results
            .iter()
            .filter(|p| self.selected.contains(&p.username))
            .cloned()
            .collect()
    }

    pub fn next_row(&mut self) {
        let visible_len = self.visible().len();
        if visible_len == 0 {
            return;
        }
        if self.cursor + 1 < visible_len {
            self.cursor += 1;
        } else {
            // roll over to the next page when there is one
            let before = self.pagination.current_page(self.results.len());
            self.pagination.next_page(self.results.len());
            if self.pagination.current_page(self.results.len()) != before {
                self.cursor = 0;
            }
        }
    }

    pub fn prev_row(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else {
            let before = self.pagination.current_page(self.results.len());
            self.pagination.prev_page(self.results.len());
            if self.pagination.current_page(self.results.len()) != before {
                self.cursor = self.visible().len().saturating_sub(1);
            }
        }
    }

    pub fn first_row(&mut self) {
        self.cursor = 0;
    }

    pub fn last_row(&mut self) {
        self.cursor = self.visible().len().saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.pagination.next_page(self.results.len());
        self.cursor = 0;
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev_page(self.results.len());
        self.cursor = 0;
    }

    pub fn cycle_page_size(&mut self) {
        self.pagination.cycle_per_page(self.results.len());
        self.cursor = 0;
    }

    /// Toggle selection of the focused row
    pub fn toggle_selection(&mut self) {
        if let Some(profile) = self.focused() {
            let username = profile.username.clone();
            if !self.selected.remove(&username) {
                self.selected.insert(username);
            }
        }
    }

    pub fn select_all(&mut self) {
        for profile in &self.results {
            self.selected.insert(profile.username.clone());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

const HEADERS: [&str; 11] = [
    "", "Username", "Full Name", "Category", "Type", "Eng", "Followers", "Following", "Media",
    "Relevance", "Interests",
];

fn truncate_cell(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}

fn row_cells(profile: &InfluencerProfile, selected: bool) -> Vec<String> {
    vec![
        if selected { "[x]" } else { "[ ]" }.to_string(),
        format!("@{}", profile.handle()),
        profile.full_name.clone(),
        profile.category.clone(),
        profile.creator_type.clone(),
        profile.engagement_display(),
        format_count(profile.followers),
        format_count(profile.followings),
        format_count(profile.media_count),
        profile.relevance_display(),
        profile
            .interests
            .as_ref()
            .map(|i| i.iter().take(3).cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default(),
    ]
}

/// Render the results table with its pagination footer
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    state: &ResultsState,
    loading: bool,
) {
    let total = state.results.len();
    let mut title = format!(" Results ({total}) ");
    if !state.selected.is_empty() {
        title = format!(" Results ({total}) [{}✓] ", state.selected.len());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));

    if loading {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Searching...",
                Style::default().fg(Color::Yellow),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if !state.has_searched {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Describe your ideal influencer and press Enter.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "/",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to focus the search input.", Style::default().fg(Color::DarkGray)),
            ]),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if total == 0 {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No results.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<Vec<String>> = state
        .visible()
        .iter()
        .map(|p| row_cells(p, state.selected.contains(&p.username)))
        .collect();

    // Column widths from header + page content, capped to keep rows on screen
    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.width());
            }
        }
    }
    for width in &mut col_widths {
        *width = (*width).min(24);
    }

    let mut lines: Vec<Line> = Vec::new();

    let header_spans: Vec<Span> = HEADERS
        .iter()
        .enumerate()
        .flat_map(|(i, h)| {
            vec![
                Span::styled(
                    format!("{:width$}", truncate_cell(h, col_widths[i]), width = col_widths[i]),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" │ "),
            ]
        })
        .collect();
    lines.push(Line::from(header_spans));

    let separator: String = col_widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(
        separator,
        Style::default().fg(Color::DarkGray),
    )));

    for (row_idx, row) in rows.iter().enumerate() {
        let focused = row_idx == state.cursor.min(rows.len().saturating_sub(1));
        let is_selected = row.first().map(|c| c == "[x]").unwrap_or(false);
        let row_spans: Vec<Span> = row
            .iter()
            .enumerate()
            .flat_map(|(i, cell)| {
                let width = col_widths.get(i).copied().unwrap_or(10);
                let style = if focused {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                vec![
                    Span::styled(
                        format!("{:width$}", truncate_cell(cell, width), width = width),
                        style,
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(row_spans));
    }

    // Pagination footer
    let (from, to) = state.pagination.showing(total);
    let current = state.pagination.current_page(total);
    let total_pages = Pagination::total_pages(total, state.pagination.per_page);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("Showing {from} to {to} of {total} results"),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("   Page {current}/{total_pages}   {}/page", state.pagination.per_page),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles(n: usize) -> Vec<InfluencerProfile> {
        (0..n)
            .map(|i| {
                serde_json::from_str(&format!(r#"{{"username": "user{i}"}}"#)).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_set_results_resets_page_and_selection() {
        let mut state = ResultsState::new();
        state.set_results(profiles(40));
        state.next_page();
        state.toggle_selection();
        assert!(!state.selected.is_empty());

        state.set_results(profiles(5));
        assert_eq!(state.pagination.current_page(5), 1);
        assert!(state.selected.is_empty());
        assert!(state.has_searched);
    }

    #[test]
    fn test_row_navigation_rolls_over_pages() {
        let mut state = ResultsState::new();
        state.set_results(profiles(30)); // 25 per page -> 2 pages
        state.last_row();
        assert_eq!(state.cursor, 24);

        state.next_row();
        assert_eq!(state.pagination.current_page(30), 2);
        assert_eq!(state.cursor, 0);

        state.prev_row();
        assert_eq!(state.pagination.current_page(30), 1);
        assert_eq!(state.cursor, 24);
    }

    #[test]
    fn test_cursor_stays_put_on_last_page() {
        let mut state = ResultsState::new();
        state.set_results(profiles(10));
        state.last_row();
        state.next_row();
        assert_eq!(state.cursor, 9);
    }

    #[test]
    fn test_toggle_selection_round_trip() {
        let mut state = ResultsState::new();
        state.set_results(profiles(3));
        state.toggle_selection();
        assert!(state.selected.contains("user0"));
        state.toggle_selection();
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_select_all_covers_full_result_set() {
        let mut state = ResultsState::new();
        state.set_results(profiles(40));
        state.select_all();
        assert_eq!(state.selected.len(), 40);
        assert_eq!(state.selected_profiles().len(), 40);
    }

    #[test]
    fn test_truncate_cell_is_width_aware() {
        assert_eq!(truncate_cell("short", 10), "short");
        let truncated = truncate_cell("a-rather-long-username", 8);
        assert!(truncated.width() <= 8);
        assert!(truncated.ends_with('…'));
    }
}
