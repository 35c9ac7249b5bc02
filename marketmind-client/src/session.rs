//! Process-wide authentication state.
//!
//! One [`SessionStore`] is created at startup and shared as
//! `Arc<SessionStore>` with every consumer that needs to know who is signed
//! in. Only [`SessionStore::login`] and [`SessionStore::logout`] mutate it.

use shared::models::{Session, UserProfile};
use tokio::sync::watch;
use tracing::info;

/// Holds the current session for the lifetime of the process.
#[derive(Debug)]
pub struct SessionStore {
    current: watch::Sender<Option<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Creates a store with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    /// Replaces the session with `user` and `token` in one assignment.
    pub fn login(&self, user: UserProfile, token: impl Into<String>) {
        info!(username = %user.username, "session started");
        self.current.send_replace(Some(Session {
            user,
            token: token.into(),
        }));
    }

    /// Clears the session in one assignment.
    pub fn logout(&self) {
        if let Some(previous) = self.current.send_replace(None) {
            info!(username = %previous.user.username, "session ended");
        }
    }

    /// Snapshot of the whole session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.current
            .borrow()
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// The current auth token, if any.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receiver notified on every login and logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}
