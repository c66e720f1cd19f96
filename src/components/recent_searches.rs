//! Recent searches section
//!
//! The ten newest saved searches, newest first. Selecting one replays it
//! through the search orchestrator.

use crate::action::Action;
use crate::component::Component;
use crate::model::RecentSearch;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Recent searches section component
pub struct RecentSearchesSection {
    pub searches: Vec<RecentSearch>,
    pub loading: bool,
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for RecentSearchesSection {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentSearchesSection {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            searches: Vec::new(),
            loading: false,
            selected_index: 0,
            list_state,
        }
    }

    pub fn set_searches(&mut self, searches: Vec<RecentSearch>) {
        self.searches = searches;
        self.loading = false;
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    pub fn select_next(&mut self) {
        let max = self.searches.len().saturating_sub(1);
        if self.selected_index < max {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for RecentSearchesSection {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Enter => self
                .searches
                .get(self.selected_index)
                .map(|s| Action::RerunSearch(s.query.clone())),
            KeyCode::Char('R') => Some(Action::RefreshSection),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Recent Searches ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        if self.loading {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Loading recent searches...",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        if self.searches.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No recent searches yet",
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Searches you run are saved here automatically.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        let items: Vec<ListItem> = self
            .searches
            .iter()
            .map(|search| {
                ListItem::new(Line::from(vec![
                    Span::styled("⌕ ", Style::default().fg(Color::Cyan)),
                    Span::styled(search.query.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  {}", search.formatted_date()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}
