//! Session model and on-disk session cache
//!
//! The identity provider issues a bearer token plus user record on sign-in.
//! Like the browser SDK's local-storage persistence, the session is cached
//! as JSON in the config directory so a restart does not force a re-login;
//! the cached token is still validated against the provider on startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The signed-in user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Sign-in state change, delivered over the auth service's subscription
/// channel
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

impl Session {
    pub fn load(path: &Path) -> Option<Session> {
        if !path.exists() {
            return None;
        }
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn clear(path: &Path) {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: "refresh".to_string(),
            user: AuthUser {
                id: "u1".to_string(),
                email: "jane@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_session_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert!(Session::load(&path).is_none());

        sample().save(&path).unwrap();
        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.user.id, "u1");
        assert_eq!(loaded.access_token, "token");

        Session::clear(&path);
        assert!(Session::load(&path).is_none());
    }

    #[test]
    fn test_corrupt_cache_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(Session::load(&path).is_none());
    }
}
