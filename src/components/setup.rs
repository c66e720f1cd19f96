//! Setup wizard component
//!
//! Interactive first-run configuration: where the hosted backend lives and
//! which publishable key to use. The search API URL ships with a default
//! and stays editable in config.json.

use crate::action::Action;
use crate::component::Component;
use crate::config::Config;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Setup wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Welcome,
    BackendUrl,
    AnonKey,
    Confirm,
}

impl SetupStep {
    fn next(&self) -> Option<SetupStep> {
        match self {
            SetupStep::Welcome => Some(SetupStep::BackendUrl),
            SetupStep::BackendUrl => Some(SetupStep::AnonKey),
            SetupStep::AnonKey => Some(SetupStep::Confirm),
            SetupStep::Confirm => None,
        }
    }

    fn prev(&self) -> Option<SetupStep> {
        match self {
            SetupStep::Welcome => None,
            SetupStep::BackendUrl => Some(SetupStep::Welcome),
            SetupStep::AnonKey => Some(SetupStep::BackendUrl),
            SetupStep::Confirm => Some(SetupStep::AnonKey),
        }
    }

    fn title(&self) -> &str {
        match self {
            SetupStep::Welcome => "Welcome",
            SetupStep::BackendUrl => "Backend URL",
            SetupStep::AnonKey => "API Key",
            SetupStep::Confirm => "Confirm",
        }
    }

    fn step_number(&self) -> usize {
        match self {
            SetupStep::Welcome => 1,
            SetupStep::BackendUrl => 2,
            SetupStep::AnonKey => 3,
            SetupStep::Confirm => 4,
        }
    }
}

/// Setup wizard component
pub struct SetupComponent {
    /// Current step
    pub step: SetupStep,
    /// Config being built
    pub config: Config,
    /// Current input text
    pub input: String,
    /// Error message to display
    pub error: Option<String>,
    /// Whether setup is complete
    pub complete: bool,
}

impl Default for SetupComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupComponent {
    pub fn new() -> Self {
        Self {
            step: SetupStep::Welcome,
            config: Config::default(),
            input: String::new(),
            error: None,
            complete: false,
        }
    }

    /// Get the saved config if setup completed successfully
    pub fn get_config(&self) -> Option<&Config> {
        if self.complete {
            Some(&self.config)
        } else {
            None
        }
    }

    fn validate_current_step(&mut self) -> bool {
        self.error = None;

        match self.step {
            SetupStep::Welcome => true,
            SetupStep::BackendUrl => {
                let input = self.input.trim();
                if input.is_empty() {
                    self.error = Some("Backend URL is required".to_string());
                    return false;
                }
                if !input.starts_with("http://") && !input.starts_with("https://") {
                    self.error = Some("Backend URL must start with http:// or https://".to_string());
                    return false;
                }
                self.config.backend_url = input.trim_end_matches('/').to_string();
                true
            }
            SetupStep::AnonKey => {
                if self.input.trim().is_empty() {
                    self.error = Some("API key is required".to_string());
                    return false;
                }
                self.config.backend_anon_key = self.input.trim().to_string();
                true
            }
            SetupStep::Confirm => true,
        }
    }

    fn advance_step(&mut self) {
        if self.validate_current_step() {
            if let Some(next) = self.step.next() {
                self.step = next;
                // Pre-populate input for next step
                self.input = match self.step {
                    SetupStep::BackendUrl => self.config.backend_url.clone(),
                    SetupStep::AnonKey => self.config.backend_anon_key.clone(),
                    _ => String::new(),
                };
            } else {
                self.save_config();
            }
        }
    }

    fn go_back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.error = None;
            // Restore input for previous step
            self.input = match self.step {
                SetupStep::Welcome | SetupStep::Confirm => String::new(),
                SetupStep::BackendUrl => self.config.backend_url.clone(),
                SetupStep::AnonKey => self.config.backend_anon_key.clone(),
            };
        }
    }

    fn save_config(&mut self) {
        match self.config.save() {
            Ok(()) => {
                self.complete = true;
            }
            Err(e) => {
                self.error = Some(format!("Failed to save config: {}", e));
            }
        }
    }
}

impl Component for SetupComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.step {
            SetupStep::Welcome => match key.code {
                KeyCode::Enter => {
                    self.advance_step();
                    Ok(None)
                }
                KeyCode::Esc => Ok(Some(Action::ForceQuit)),
                _ => Ok(None),
            },
            SetupStep::BackendUrl | SetupStep::AnonKey => match key.code {
                KeyCode::Enter => {
                    self.advance_step();
                    Ok(None)
                }
                KeyCode::Esc => {
                    self.go_back();
                    Ok(None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    self.error = None;
                    Ok(None)
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.error = None;
                    Ok(None)
                }
                _ => Ok(None),
            },
            SetupStep::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.save_config();
                    if self.complete {
                        Ok(Some(Action::SetupConfirm))
                    } else {
                        Ok(None)
                    }
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Backspace => {
                    self.go_back();
                    Ok(None)
                }
                _ => Ok(None),
            },
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(Color::Reset));
        frame.render_widget(background, area);

        let margin = 4;
        let content_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Progress
                Constraint::Min(10),   // Content
                Constraint::Length(3), // Help
            ])
            .split(content_area);

        let title = Paragraph::new(Line::from(vec![Span::styled(
            " scout-tui Setup ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let progress = format!(
            "Step {} of 4: {}",
            self.step.step_number(),
            self.step.title()
        );
        let progress_widget = Paragraph::new(Line::from(vec![Span::styled(
            progress,
            Style::default().fg(Color::DarkGray),
        )]));
        frame.render_widget(progress_widget, chunks[1]);

        self.draw_step_content(frame, chunks[2]);

        let help_text = match self.step {
            SetupStep::Welcome => " Enter  Continue   Esc  Quit",
            SetupStep::BackendUrl | SetupStep::AnonKey => {
                " Enter  Continue   Esc  Back   Type to edit"
            }
            SetupStep::Confirm => " Enter/y  Save & Continue   Esc/n  Go Back",
        };
        let help = Paragraph::new(Line::from(vec![Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        )]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);

        Ok(())
    }
}

impl SetupComponent {
    fn draw_step_content(&self, frame: &mut Frame, area: Rect) {
        match self.step {
            SetupStep::Welcome => self.draw_welcome(frame, area),
            SetupStep::BackendUrl => self.draw_input_step(
                frame,
                area,
                " Backend URL ",
                "Enter your hosted backend project URL:",
                "(e.g. https://abcdefgh.supabase.co)",
            ),
            SetupStep::AnonKey => self.draw_input_step(
                frame,
                area,
                " API Key ",
                "Enter the backend's publishable (anon) key:",
                "(found under the project's API settings)",
            ),
            SetupStep::Confirm => self.draw_confirm(frame, area),
        }
    }

    fn draw_welcome(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Welcome to scout-tui!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("This wizard will connect the app to your account backend."),
            Line::from(""),
            Line::from("You will need to provide:"),
            Line::from(vec![Span::styled(
                "  1. Your hosted backend project URL",
                Style::default().fg(Color::Cyan),
            )]),
            Line::from(vec![Span::styled(
                "  2. Its publishable (anon) API key",
                Style::default().fg(Color::Cyan),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press Enter to begin...",
                Style::default().fg(Color::Yellow),
            )]),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Welcome ")
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(paragraph, area);
    }

    fn draw_input_step(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        prompt: &str,
        hint: &str,
    ) {
        let mut lines = vec![
            Line::from(""),
            Line::from(prompt.to_string()),
            Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}_", &self.input),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(paragraph, area);
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect) {
        let config_dir = Config::config_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.scout-tui".to_string());

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Review your configuration:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Backend URL: ", Style::default().fg(Color::Cyan)),
                Span::raw(&self.config.backend_url),
            ]),
            Line::from(vec![
                Span::styled("API Key:     ", Style::default().fg(Color::Cyan)),
                Span::raw(mask_key(&self.config.backend_anon_key)),
            ]),
            Line::from(vec![
                Span::styled("Search API:  ", Style::default().fg(Color::Cyan)),
                Span::raw(&self.config.search_api_url),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Config will be saved to: ",
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{}/config.json", config_dir)),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press Enter or 'y' to save and continue...",
                Style::default().fg(Color::Yellow),
            )]),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Configuration ")
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(paragraph, area);
    }
}

/// Show only the tail of a key in the confirmation view
fn mask_key(key: &str) -> String {
    if key.len() <= 8 {
        "•".repeat(key.len())
    } else {
        format!("…{}", &key[key.len() - 6..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "•••••");
        assert_eq!(mask_key("a-much-longer-api-key"), "…pi-key");
    }
}
