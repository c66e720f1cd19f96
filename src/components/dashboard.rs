//! Dashboard - the authenticated main screen
//!
//! Sidebar section switcher plus the search section (input + results
//! table). Owns the search input and the result-set presentation state;
//! recent searches and campaigns render through their own section
//! components.

use crate::action::Action;
use crate::component::Component;
use crate::components::results::{render_results, ResultsState};
use crate::components::{calculate_dashboard_layout, CampaignsSection, RecentSearchesSection};
use crate::model::Section;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Dashboard component: section switching + the search section
pub struct DashboardComponent {
    pub section: Section,
    pub search_input: String,
    pub search_focus: bool,
    pub results: ResultsState,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            section: Section::Search,
            search_input: String::new(),
            search_focus: false,
            results: ResultsState::new(),
        }
    }

    /// Reset everything on sign-out; selection and results are ephemeral
    pub fn teardown(&mut self) {
        self.section = Section::Search;
        self.search_input.clear();
        self.search_focus = false;
        self.results = ResultsState::new();
    }

    pub fn next_section(&mut self) {
        let sections = Section::all();
        let idx = sections.iter().position(|s| *s == self.section).unwrap();
        self.section = sections[(idx + 1) % sections.len()];
    }

    pub fn prev_section(&mut self) {
        let sections = Section::all();
        let idx = sections.iter().position(|s| *s == self.section).unwrap();
        self.section = sections[(idx + sections.len() - 1) % sections.len()];
    }
}

impl Component for DashboardComponent {
    /// Key handling for the search section's results table.
    ///
    /// Section switching, search focus, and global keys are routed by the
    /// root App before this is reached.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char('s') => Some(Action::CyclePageSize),
            KeyCode::Char(' ') => Some(Action::ToggleRowSelection),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SelectAllRows)
            }
            KeyCode::Char('a') => Some(Action::OpenAddToCampaign),
            KeyCode::Char('x') => Some(Action::ExportCsv),
            KeyCode::Enter => Some(Action::OpenProfile),
            KeyCode::Esc if !self.results.selected.is_empty() => Some(Action::ClearSelection),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_dashboard which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardRenderContext<'a> {
    pub email: &'a str,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub search_loading: bool,
}

/// Draw the dashboard screen
pub fn draw_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    recent: &mut RecentSearchesSection,
    campaigns: &mut CampaignsSection,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let layout = calculate_dashboard_layout(area);

    render_sidebar(frame, layout.sidebar, dashboard, ctx);
    render_header(frame, layout.header, dashboard);

    match dashboard.section {
        Section::Search => {
            render_results(frame, layout.content, &dashboard.results, ctx.search_loading);
        }
        Section::RecentSearches => recent.draw(frame, layout.content)?,
        Section::Campaigns => campaigns.draw(frame, layout.content)?,
    }

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, dashboard);

    Ok(())
}

fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardComponent,
    ctx: &DashboardRenderContext,
) {
    let mut items: Vec<ListItem> = Section::all()
        .iter()
        .map(|section| {
            let active = *section == dashboard.section;
            let style = if active {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(if active { "▶ " } else { "  " }, style),
                Span::styled(section.name().to_string(), style),
            ]))
        })
        .collect();

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        ctx.email.to_string(),
        Style::default().fg(Color::DarkGray),
    ))));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" scout ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

fn render_header(frame: &mut Frame, area: Rect, dashboard: &DashboardComponent) {
    let (border_color, input_span) = if dashboard.search_focus {
        (
            Color::Magenta,
            Span::styled(
                format!("{}_", dashboard.search_input),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        )
    } else if dashboard.search_input.is_empty() {
        (
            Color::DarkGray,
            Span::styled(
                "Describe your ideal influencer (press / to type)",
                Style::default().fg(Color::DarkGray),
            ),
        )
    } else {
        (
            Color::DarkGray,
            Span::styled(
                dashboard.search_input.clone(),
                Style::default().fg(Color::Gray),
            ),
        )
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(Color::Magenta)),
        input_span,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dashboard.section.name()))
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let mut spans = vec![];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, dashboard: &DashboardComponent) {
    let help_spans = if dashboard.search_focus {
        vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Search  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]
    } else if !dashboard.results.selected.is_empty() && dashboard.section == Section::Search {
        vec![
            Span::styled(
                " Space ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Toggle  "),
            Span::styled(
                " a ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Add to campaign  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Clear  "),
            Span::styled(
                format!("{} selected", dashboard.results.selected.len()),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            Span::styled(
                " / ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Search "),
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Section "),
            Span::styled(
                " Space ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Select "),
            Span::styled(
                " a ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Campaign "),
            Span::styled(
                " x ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Export "),
            Span::styled(
                " s ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Page size "),
            Span::styled(
                " S ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Sign out "),
            Span::styled(
                " ? ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Help "),
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(ratatui::layout::Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
