//! Login / signup dialog
//!
//! Email and password form over the identity provider. Validation runs
//! client-side before any request: email must be 3-255 characters and look
//! like an address, password at least 6 characters. Provider errors are
//! mapped to friendly messages where we recognize them and passed through
//! verbatim otherwise.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Which auth operation the dialog will perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    fn title(&self) -> &str {
        match self {
            AuthMode::Login => "Welcome Back",
            AuthMode::Signup => "Create Account",
        }
    }
}

/// Which field has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
}

/// Login/signup dialog component
pub struct AuthDialog {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    field: Field,
    /// Validation or provider error shown inline
    pub error: Option<String>,
    /// Info line (e.g. confirmation mail sent)
    pub notice: Option<String>,
    /// True while a sign-in/up request is in flight
    pub loading: bool,
}

impl Default for AuthDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthDialog {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            field: Field::Email,
            error: None,
            notice: None,
            loading: false,
        }
    }

    /// Reset for a fresh open
    pub fn open(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.email.clear();
        self.password.clear();
        self.field = Field::Email;
        self.error = None;
        self.notice = None;
        self.loading = false;
    }

    /// Validate the form; on failure stores the inline error and returns
    /// false.
    pub fn validate(&mut self) -> bool {
        match validate_credentials(&self.email, &self.password) {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    /// Store a provider failure, mapped to a friendly message
    pub fn set_provider_error(&mut self, raw_message: &str) {
        self.error = Some(friendly_auth_message(self.mode, raw_message));
        self.loading = false;
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.error = None;
        self.notice = None;
    }

    fn active_input(&mut self) -> &mut String {
        match self.field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }
}

/// Client-side credential validation
pub fn validate_credentials(email: &str, password: &str) -> std::result::Result<(), String> {
    if email.len() < 3 || email.len() > 255 {
        return Err("Please enter a valid email address".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    Ok(())
}

/// Map a provider error message to something friendlier where we recognize
/// it; unknown messages pass through verbatim.
pub fn friendly_auth_message(mode: AuthMode, raw: &str) -> String {
    match mode {
        AuthMode::Login => {
            if raw == "Invalid login credentials" {
                "Invalid email or password".to_string()
            } else {
                raw.to_string()
            }
        }
        AuthMode::Signup => {
            let lower = raw.to_lowercase();
            if lower.contains("email") {
                "Please enter a valid email address".to_string()
            } else if lower.contains("password") {
                "Password must be at least 6 characters".to_string()
            } else {
                raw.to_string()
            }
        }
    }
}

impl Component for AuthDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.loading {
            // Only allow bailing out while a request is in flight
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseModal),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::AuthSubmit),
            KeyCode::Tab | KeyCode::Down => {
                self.field = match self.field {
                    Field::Email => Field::Password,
                    Field::Password => Field::Email,
                };
                None
            }
            KeyCode::Up => {
                self.field = Field::Email;
                None
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_mode();
                None
            }
            KeyCode::Backspace => {
                self.active_input().pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) => {
                self.active_input().push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 52, 15);
        frame.render_widget(Clear, popup_area);

        let masked: String = "•".repeat(self.password.chars().count());
        let field_style = |active: bool| {
            if active {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            }
        };
        let cursor = |active: bool| if active { "_" } else { "" };

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Email",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}{}", self.email, cursor(self.field == Field::Email)),
                    field_style(self.field == Field::Email),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Password",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{}{}", masked, cursor(self.field == Field::Password)),
                    field_style(self.field == Field::Password),
                ),
            ]),
        ];

        if self.mode == AuthMode::Signup {
            content.push(Line::from(Span::styled(
                "Password must be at least 6 characters",
                Style::default().fg(Color::DarkGray),
            )));
        }

        if let Some(ref error) = self.error {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(ref notice) = self.notice {
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Green),
            )));
        }

        content.push(Line::from(""));
        if self.loading {
            content.push(Line::from(Span::styled(
                "Loading...",
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
                Span::raw(match self.mode {
                    AuthMode::Login => "Sign In  ",
                    AuthMode::Signup => "Create Account  ",
                }),
                Span::styled(
                    " Ctrl-t ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(match self.mode {
                    AuthMode::Login => "Switch to signup  ",
                    AuthMode::Signup => "Switch to login  ",
                }),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Close"),
            ]));
        }

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(format!(" {} ", self.mode.title()))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials_bounds() {
        assert!(validate_credentials("jane@example.com", "secret1").is_ok());
        // too short overall
        assert!(validate_credentials("a@", "secret1").is_err());
        // not an address shape
        assert!(validate_credentials("not-an-email", "secret1").is_err());
        assert!(validate_credentials("jane@@example.com", "secret1").is_err());
        // over the length bound
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_credentials(&long, "secret1").is_err());
        // short password
        assert!(validate_credentials("jane@example.com", "12345").is_err());
    }

    #[test]
    fn test_friendly_login_mapping() {
        assert_eq!(
            friendly_auth_message(AuthMode::Login, "Invalid login credentials"),
            "Invalid email or password"
        );
        // unknown messages pass through verbatim
        assert_eq!(
            friendly_auth_message(AuthMode::Login, "Email not confirmed"),
            "Email not confirmed"
        );
    }

    #[test]
    fn test_friendly_signup_mapping() {
        assert_eq!(
            friendly_auth_message(AuthMode::Signup, "Unable to validate email address"),
            "Please enter a valid email address"
        );
        assert_eq!(
            friendly_auth_message(AuthMode::Signup, "Password should be at least 6 characters"),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            friendly_auth_message(AuthMode::Signup, "Signup disabled"),
            "Signup disabled"
        );
    }
}
