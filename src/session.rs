//! Process-wide login session.
//!
//! Created logged-out at startup, begun on login/signup, ended on logout.

use std::sync::RwLock;

use chrono::Utc;

use crate::models::{Account, Session};

#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any existing one.
    pub fn begin(&self, account: Account) -> Session {
        let session = Session {
            account,
            started_at: Utc::now(),
        };
        if let Ok(mut current) = self.current.write() {
            *current = Some(session.clone());
        }
        tracing::debug!(user_id = ?session.account.id, "Session started");
        session
    }

    /// End the session, returning it if one was active.
    pub fn end(&self) -> Option<Session> {
        let ended = self.current.write().ok()?.take();
        if let Some(session) = &ended {
            tracing::debug!(user_id = ?session.account.id, "Session ended");
        }
        ended
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().ok()?.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }
}
