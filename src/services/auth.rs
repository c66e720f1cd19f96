//! Client for the hosted identity provider
//!
//! Speaks the provider's auth REST surface (`/auth/v1`): password sign-in,
//! sign-up with a redirect target, sign-out, and current-user lookup. The
//! active session is cached on disk between runs and validated against the
//! provider on startup.
//!
//! Session changes are broadcast over subscription channels: call
//! [`AuthClient::subscribe`] once, poll the receiver each tick, drop it on
//! teardown. Every successful sign-in/sign-out notifies all live
//! subscribers.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::model::session::{Session, SessionEvent};
use crate::services::error::ApiError;

/// Result of a sign-up request.
///
/// Providers configured with email confirmation answer with a bare user
/// record; auto-confirm setups answer with a full session.
#[derive(Debug)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationEmailSent,
}

/// Shape of a successful `/token` or auto-confirm `/signup` response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    user: crate::model::AuthUser,
}

pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
    session_path: Option<PathBuf>,
    current: Mutex<Option<Session>>,
    listeners: Mutex<Vec<Sender<SessionEvent>>>,
}

impl AuthClient {
    /// Create a client against the backend's `/auth/v1` surface.
    ///
    /// `session_path` is where the active session is cached; `None`
    /// disables persistence (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest` client cannot
    /// be constructed.
    pub fn new(
        backend_url: &str,
        anon_key: &str,
        session_path: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scout-tui/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/auth/v1", backend_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            session_path,
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Subscribe to session-change notifications.
    ///
    /// Dropping the receiver unsubscribes; dead senders are pruned on the
    /// next notification.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.lock().unwrap().push(tx);
        rx
    }

    fn notify(&self, event: &SessionEvent) {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn adopt_session(&self, session: Session) {
        if let Some(ref path) = self.session_path {
            if let Err(err) = session.save(path) {
                tracing::warn!(error = %err, "failed to cache session");
            }
        }
        *self.current.lock().unwrap() = Some(session.clone());
        self.notify(&SessionEvent::SignedIn(session));
    }

    fn drop_session(&self) {
        if let Some(ref path) = self.session_path {
            Session::clear(path);
        }
        *self.current.lock().unwrap() = None;
        self.notify(&SessionEvent::SignedOut);
    }

    /// Copy of the active session, if any
    pub fn session(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    /// Restore and validate the session from a previous run.
    ///
    /// Any failure - no cache, invalid token, network error - resolves to
    /// anonymous rather than an error; the landing screen is always a safe
    /// answer.
    pub fn current_session(&self) -> Option<Session> {
        let path = self.session_path.as_ref()?;
        let cached = Session::load(path)?;

        match self.fetch_user(&cached.access_token) {
            Ok(user) => {
                let session = Session { user, ..cached };
                *self.current.lock().unwrap() = Some(session.clone());
                Some(session)
            }
            Err(err) => {
                tracing::warn!(error = %err, "cached session rejected, treating as signed out");
                Session::clear(path);
                None
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the session is cached and subscribers are notified.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] carries the provider's message (e.g. `Invalid
    /// login credentials`) for the UI to map.
    pub fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }

        let body = response.text()?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: "sign_in_with_password".to_string(),
                source: e,
            })?;

        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user: token.user,
        };
        self.adopt_session(session.clone());
        Ok(session)
    }

    /// Create an account, pointing the confirmation mail at `redirect_to`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] carries the provider's message for the UI to
    /// map.
    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, ApiError> {
        let url = format!("{}/signup", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .query(&[("redirect_to", redirect_to)])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }

        let body = response.text()?;
        // Auto-confirm setups answer with a session; otherwise it's a bare
        // user record awaiting email confirmation.
        if let Ok(token) = serde_json::from_str::<TokenResponse>(&body) {
            let session = Session {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
                user: token.user,
            };
            self.adopt_session(session.clone());
            Ok(SignUpOutcome::SignedIn(session))
        } else {
            Ok(SignUpOutcome::ConfirmationEmailSent)
        }
    }

    /// Sign out.
    ///
    /// The remote revocation is best-effort: its failure is logged, but the
    /// local session is always dropped and subscribers always see
    /// `SignedOut`.
    pub fn sign_out(&self) {
        let token = self.session().map(|s| s.access_token);

        if let Some(token) = token {
            let url = format!("{}/logout", self.base_url);
            let result = self
                .client
                .post(&url)
                .header("apikey", &self.anon_key)
                .bearer_auth(&token)
                .send();
            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = response.status().as_u16(), "sign-out rejected");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "sign-out request failed");
                }
                _ => {}
            }
        }

        self.drop_session();
    }

    /// `GET /user` with a bearer token
    fn fetch_user(&self, access_token: &str) -> Result<crate::model::AuthUser, ApiError> {
        let url = format!("{}/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: "fetch_user".to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthUser;

    fn offline_client() -> AuthClient {
        AuthClient::new("http://localhost:9", "anon", None).unwrap()
    }

    #[test]
    fn test_subscribers_receive_sign_out() {
        let client = offline_client();
        let rx = client.subscribe();

        *client.current.lock().unwrap() = Some(Session {
            access_token: String::new(),
            refresh_token: String::new(),
            user: AuthUser {
                id: "u1".to_string(),
                email: String::new(),
            },
        });
        client.drop_session();

        assert!(matches!(rx.try_recv(), Ok(SessionEvent::SignedOut)));
        assert!(client.session().is_none());
    }

    #[test]
    fn test_dead_subscribers_are_pruned() {
        let client = offline_client();
        drop(client.subscribe());
        let rx = client.subscribe();

        client.notify(&SessionEvent::SignedOut);

        assert_eq!(client.listeners.lock().unwrap().len(), 1);
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::SignedOut)));
    }

    #[test]
    fn test_current_session_without_cache_is_anonymous() {
        let client = offline_client();
        assert!(client.current_session().is_none());
    }
}
