use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

/// Opaque token handed out by the api on login.
#[derive(Deserialize)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

#[derive(Debug)]
pub struct Session {
    pub token: BearerToken,
    pub user: UserProfile,
}

/// Held in memory for the lifetime of the process, never persisted.
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    SignedIn(Session),
}

impl SessionState {
    pub fn sign_in(&mut self, session: Session) {
        *self = SessionState::SignedIn(session);
    }

    pub fn logout(&mut self) {
        *self = SessionState::Anonymous;
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    pub fn greeting(&self) -> Option<String> {
        self.session()
            .map(|session| format!("Hi, {}", session.user.username))
    }
}
