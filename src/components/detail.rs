//! Profile detail pane
//!
//! Full attribute view of one profile, opened after the credit-consent
//! gate. Rendered as a right-side overlay pane, scrollable.

use crate::action::Action;
use crate::component::Component;
use crate::model::profile::{format_count, InfluencerProfile};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct ProfileDetailPane {
    profile: Option<InfluencerProfile>,
    pub scroll_offset: usize,
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn value_line(text: String) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
}

fn list_or_na(items: &Option<Vec<String>>) -> String {
    match items {
        Some(list) if !list.is_empty() => list.join(", "),
        _ => "N/A".to_string(),
    }
}

impl ProfileDetailPane {
    pub fn set_profile(&mut self, profile: InfluencerProfile) {
        self.profile = Some(profile);
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.profile = None;
    }

    fn build_lines(profile: &InfluencerProfile) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    profile.full_name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  @{}", profile.handle()),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(""),
        ];

        lines.push(heading("Category"));
        lines.push(value_line(if profile.category.is_empty() {
            "N/A".to_string()
        } else {
            profile.category.clone()
        }));
        lines.push(Line::from(""));

        lines.push(heading("Location"));
        lines.push(value_line(profile.location_display()));
        lines.push(Line::from(""));

        lines.push(heading("Interests"));
        lines.push(value_line(list_or_na(&profile.interests)));
        lines.push(Line::from(""));

        lines.push(heading("Recent Brands"));
        lines.push(value_line(list_or_na(&profile.recent_brands)));
        lines.push(Line::from(""));

        lines.push(heading("Types of Brands"));
        lines.push(value_line(list_or_na(&profile.types_of_brands)));
        lines.push(Line::from(""));

        lines.push(heading("Top 10 Hashtags"));
        lines.push(value_line(list_or_na(&profile.top_10_hashtags)));
        lines.push(Line::from(""));

        lines.push(heading("Metrics"));
        lines.push(value_line(format!(
            "Followers: {}   Following: {}",
            format_count(profile.followers),
            format_count(profile.followings)
        )));
        lines.push(value_line(format!(
            "Avg likes: {}   Avg comments: {}",
            format_count(profile.avg_likes as u64),
            format_count(profile.avg_comments as u64)
        )));
        lines.push(value_line(format!(
            "Engagement: {}   Relevance: {}",
            profile.engagement_display(),
            profile.relevance_display()
        )));
        lines.push(value_line(format!(
            "Media: {}   Highlight reels: {}",
            format_count(profile.media_count),
            format_count(profile.highlight_reel_count)
        )));
        lines.push(Line::from(""));

        lines.push(heading("Branded Posts"));
        match &profile.branded_posts {
            Some(posts) if !posts.is_empty() => {
                for post in posts {
                    lines.push(Line::from(Span::styled(
                        post.clone(),
                        Style::default().fg(Color::Magenta),
                    )));
                }
            }
            _ => lines.push(value_line("No branded posts available".to_string())),
        }

        lines
    }
}

impl Component for ProfileDetailPane {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            Action::PageDown => self.scroll_offset = self.scroll_offset.saturating_add(10),
            Action::PageUp => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let Some(ref profile) = self.profile else {
            return Ok(());
        };

        // right-half overlay
        let width = area.width / 2;
        let pane_area = Rect::new(area.x + area.width - width, area.y, width, area.height);
        frame.render_widget(Clear, pane_area);

        let lines = Self::build_lines(profile);
        let total = lines.len();
        let visible_height = pane_area.height.saturating_sub(2) as usize;
        let scroll = self.scroll_offset.min(total.saturating_sub(visible_height));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Profile ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .scroll((scroll as u16, 0));

        frame.render_widget(paragraph, pane_area);
        Ok(())
    }
}
