//! Campaigns section
//!
//! The user's campaigns, newest first, with their frozen influencer
//! snapshots. Enter expands a campaign into a detail list; `c` opens the
//! create-campaign dialog.

use crate::action::Action;
use crate::component::Component;
use crate::model::profile::format_count;
use crate::model::Campaign;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Campaigns section component
pub struct CampaignsSection {
    pub campaigns: Vec<Campaign>,
    pub loading: bool,
    pub selected_index: usize,
    pub list_state: ListState,
    /// Id of the campaign whose influencer list is expanded
    pub expanded: Option<String>,
}

impl Default for CampaignsSection {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignsSection {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            campaigns: Vec::new(),
            loading: false,
            selected_index: 0,
            list_state,
            expanded: None,
        }
    }

    pub fn set_campaigns(&mut self, campaigns: Vec<Campaign>) {
        // keep the expansion if the campaign still exists
        if let Some(ref id) = self.expanded {
            if !campaigns.iter().any(|c| &c.id == id) {
                self.expanded = None;
            }
        }
        self.campaigns = campaigns;
        self.loading = false;
        self.selected_index = self
            .selected_index
            .min(self.campaigns.len().saturating_sub(1));
        self.list_state.select(Some(self.selected_index));
    }

    fn toggle_expanded(&mut self) {
        let Some(campaign) = self.campaigns.get(self.selected_index) else {
            return;
        };
        if self.expanded.as_deref() == Some(campaign.id.as_str()) {
            self.expanded = None;
        } else {
            self.expanded = Some(campaign.id.clone());
        }
    }

    fn expanded_campaign(&self) -> Option<&Campaign> {
        let id = self.expanded.as_deref()?;
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn select_next(&mut self) {
        let max = self.campaigns.len().saturating_sub(1);
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

impl Component for CampaignsSection {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Enter => {
                self.toggle_expanded();
                None
            }
            KeyCode::Char('c') => Some(Action::OpenCreateCampaign),
            KeyCode::Char('R') => Some(Action::RefreshSection),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Campaigns ({}) ", self.campaigns.len()))
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
                    "Loading campaigns...",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        if self.campaigns.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No campaigns yet",
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        "c",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" to create one.", Style::default().fg(Color::DarkGray)),
                ]),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        // split horizontally when a campaign is expanded
        let (list_area, detail_area) = if self.expanded_campaign().is_some() {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let items: Vec<ListItem> = self
            .campaigns
            .iter()
            .map(|campaign| {
                let is_expanded = self.expanded.as_deref() == Some(campaign.id.as_str());
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_expanded { "▼ " } else { "▶ " },
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        campaign.name.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  ({})", campaign.influencers.len()),
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

        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        if let (Some(detail_area), Some(campaign)) = (detail_area, self.expanded_campaign()) {
            let mut lines = Vec::new();
            if campaign.influencers.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "No influencers in this campaign yet.",
                    Style::default().fg(Color::Gray),
                )));
            } else {
                for inf in &campaign.influencers {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("@{}", inf.username),
                            Style::default().fg(Color::Magenta),
                        ),
                        Span::styled(
                            format!(
                                "  {} followers · {:.1}% · added {}",
                                format_count(inf.followers),
                                inf.engagement_rate,
                                inf.added_at.format("%d/%m/%Y"),
                            ),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]));
                }
            }

            let detail = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", campaign.name))
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(detail, detail_area);
        }

        Ok(())
    }
}
