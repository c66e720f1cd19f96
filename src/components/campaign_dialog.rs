//! Add-to-campaign dialog
//!
//! Picker over the user's campaigns. Opening the dialog triggers a fresh
//! campaign fetch; space toggles target campaigns; confirm fans the current
//! selection out to every checked campaign.

use crate::action::Action;
use crate::component::Component;
use crate::model::Campaign;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Campaign picker dialog
pub struct AddToCampaignDialog {
    /// Campaigns available as targets
    pub campaigns: Vec<Campaign>,
    /// Checked campaign ids
    pub checked: HashSet<String>,
    /// Cursor position in the list
    pub selected_index: usize,
    pub list_state: ListState,
    /// True while the campaign list is being fetched
    pub loading: bool,
    /// True while the assignment fan-out is running
    pub assigning: bool,
    pub error: Option<String>,
}

impl Default for AddToCampaignDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AddToCampaignDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            campaigns: Vec::new(),
            checked: HashSet::new(),
            selected_index: 0,
            list_state,
            loading: false,
            assigning: false,
            error: None,
        }
    }

    /// Reset for a fresh open; the campaign fetch is spawned by the app
    pub fn open(&mut self) {
        self.campaigns.clear();
        self.checked.clear();
        self.selected_index = 0;
        self.list_state.select(Some(0));
        self.loading = true;
        self.assigning = false;
        self.error = None;
    }

    pub fn set_campaigns(&mut self, campaigns: Vec<Campaign>) {
        self.campaigns = campaigns;
        self.loading = false;
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Ids of the checked target campaigns, in list order
    pub fn checked_targets(&self) -> Vec<Campaign> {
        self.campaigns
            .iter()
            .filter(|c| self.checked.contains(&c.id))
            .cloned()
            .collect()
    }

    fn toggle_current(&mut self) {
        if let Some(campaign) = self.campaigns.get(self.selected_index) {
            if !self.checked.remove(&campaign.id) {
                self.checked.insert(campaign.id.clone());
            }
        }
    }

    fn select_next(&mut self) {
        let max = self.campaigns.len().saturating_sub(1);
        if self.selected_index < max {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for AddToCampaignDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.assigning {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Char(' ') => {
                self.toggle_current();
                None
            }
            KeyCode::Enter => {
                if self.checked.is_empty() {
                    self.error = Some("Please select at least one campaign.".to_string());
                    None
                } else {
                    Some(Action::ConfirmModal)
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup_width = 54u16.min(area.width.saturating_sub(4));
        let content_height = if self.campaigns.is_empty() {
            6
        } else {
            self.campaigns.len() as u16 + 2
        };
        let popup_height = (content_height + 6)
            .min(area.height.saturating_sub(4))
            .max(12);

        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let header_text = if let Some(ref error) = self.error {
            Span::styled(error.clone(), Style::default().fg(Color::Red))
        } else if self.assigning {
            Span::styled("Adding influencers...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                format!("{} campaign(s) selected", self.checked.len()),
                Style::default().fg(Color::Cyan),
            )
        };

        let header = Paragraph::new(Line::from(header_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add to Campaign ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        if self.loading {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Loading campaigns...",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(loading, main_chunks[1]);
        } else if self.campaigns.is_empty() {
            let empty_message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No campaigns available.",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    "Please create one in the Campaigns section.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty_message, main_chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .campaigns
                .iter()
                .map(|campaign| {
                    let is_checked = self.checked.contains(&campaign.id);
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            if is_checked { "[x] " } else { "[ ] " },
                            Style::default().fg(Color::Green),
                        ),
                        Span::styled(
                            campaign.name.clone(),
                            if is_checked {
                                Style::default()
                                    .fg(Color::Green)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                        Span::styled(
                            format!("  ({} influencers)", campaign.influencers.len()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, main_chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Green)),
            Span::raw("Toggle  "),
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Add to selected  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

        Ok(())
    }
}
