//! Help dialog showing all keyboard shortcuts

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Keyboard shortcut reference
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<10}", key),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(description.to_string()),
    ])
}

fn section_line(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 4;
        let overlay_area = Rect::new(
            margin,
            2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(4),
        );

        frame.render_widget(Clear, overlay_area);

        let lines = vec![
            section_line("Search"),
            key_line("/", "Focus the search input"),
            key_line("Enter", "Submit search / open focused profile"),
            key_line("Esc", "Leave the search input"),
            Line::from(""),
            section_line("Results"),
            key_line("j/k", "Move row focus"),
            key_line("h/l", "Previous / next page"),
            key_line("g/G", "First / last row on page"),
            key_line("s", "Cycle page size (10/25/50/100)"),
            key_line("Space", "Toggle row selection"),
            key_line("Ctrl-a", "Select all results"),
            key_line("Esc", "Clear selection"),
            key_line("a", "Add selection to campaigns"),
            key_line("x", "Export results to CSV"),
            Line::from(""),
            section_line("Sections"),
            key_line("Tab", "Next sidebar section"),
            key_line("BackTab", "Previous sidebar section"),
            key_line("R", "Refresh the active section"),
            key_line("c", "Create campaign (Campaigns section)"),
            Line::from(""),
            section_line("Session"),
            key_line("S", "Sign out"),
            key_line("q", "Quit"),
            key_line("?", "This help"),
        ];

        let total = lines.len();
        let visible_height = overlay_area.height.saturating_sub(2) as usize;
        let scroll = self.scroll_offset.min(total.saturating_sub(visible_height));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((scroll as u16, 0));

        frame.render_widget(paragraph, overlay_area);
        Ok(())
    }
}
