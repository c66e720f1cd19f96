//! Campaign name input dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Create-campaign dialog
#[derive(Default)]
pub struct CreateCampaignDialog {
    pub name: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl CreateCampaignDialog {
    pub fn open(&mut self) {
        self.name.clear();
        self.error = None;
        self.loading = false;
    }
}

impl Component for CreateCampaignDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.loading {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseModal),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => {
                if self.name.trim().is_empty() {
                    self.error = Some("Campaign name is required".to_string());
                    None
                } else {
                    Some(Action::ConfirmModal)
                }
            }
            KeyCode::Backspace => {
                self.name.pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.name.push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 52, 10);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Campaign Name",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}_", self.name),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(ref error) = self.error {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        content.push(Line::from(""));
        if self.loading {
            content.push(Line::from(Span::styled(
                "Creating...",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            content.push(Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Create  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]));
        }

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Create New Campaign ")
                .title_style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
