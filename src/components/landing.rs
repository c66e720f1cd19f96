//! Landing screen - anonymous entry point
//!
//! Hero copy, category tags, suggested prompts, and a search input. A
//! submitted query is captured as pending intent, the auth dialog opens,
//! and the query replays into the dashboard search after sign-in.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SUGGESTED_PROMPTS: [&str; 2] = [
    "Tech influencers with 100k+ followers",
    "Beauty vloggers for product launch",
];

const CATEGORIES: [&str; 5] = ["Lifestyle", "Business", "Photography", "Fashion", "Marketing"];

/// Landing screen component
#[derive(Default)]
pub struct LandingComponent {
    pub search_input: String,
    /// Index of the last prompt cycled in, for round-robin
    prompt_index: usize,
}

impl LandingComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the next suggested prompt into the input
    fn apply_next_prompt(&mut self) {
        self.search_input = SUGGESTED_PROMPTS[self.prompt_index].to_string();
        self.prompt_index = (self.prompt_index + 1) % SUGGESTED_PROMPTS.len();
    }
}

impl Component for LandingComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Enter => Some(Action::SubmitLandingSearch),
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.apply_next_prompt();
                None
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::OpenAuthDialog)
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // hero
                Constraint::Length(3), // search input
                Constraint::Length(4), // prompts + categories
                Constraint::Min(0),    // plans
                Constraint::Length(3), // help bar
            ])
            .margin(2)
            .split(area);

        let hero = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "AI-Powered ",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "Creator Discovery",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "100,000+ verified influencers at your fingertips",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(hero, chunks[0]);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Magenta)),
            if self.search_input.is_empty() {
                Span::styled(
                    "Describe your ideal influencer",
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::styled(
                    format!("{}_", self.search_input),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            },
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(input, chunks[1]);

        let mut tag_spans = vec![Span::styled("Categories: ", Style::default().fg(Color::DarkGray))];
        for (i, category) in CATEGORIES.iter().enumerate() {
            if i > 0 {
                tag_spans.push(Span::raw("  "));
            }
            tag_spans.push(Span::styled(
                format!("[{category}]"),
                Style::default().fg(Color::Cyan),
            ));
        }
        let prompts = Paragraph::new(vec![
            Line::from(tag_spans),
            Line::from(vec![
                Span::styled("Try: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    SUGGESTED_PROMPTS.join("  ·  "),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(prompts, chunks[2]);

        let plans = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Starter - free forever · Growth - $49/month · Enterprise - custom",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Start free and scale as you grow. No hidden fees, cancel anytime.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(plans, chunks[3]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Search (sign in first)  "),
            Span::styled(
                " Ctrl-l ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Sign in  "),
            Span::styled(
                " Ctrl-p ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Suggested prompt  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);

        Ok(())
    }
}
