//! Per-chat session bookkeeping
//!
//! A session holds the chat's dialogue state, the organization profile
//! once it is known, and the draft inputs of the flow in progress.
//! Sessions are snapshotted out of the store, mutated by the handler and
//! written back, so the store lock is never held across a generation
//! request.

use crate::dialog::state::DialogState;
use crate::types::NgoProfile;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Draft inputs of the flow in progress, cleared when a flow starts
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// Profile being filled during onboarding
    pub profile: NgoProfile,

    // Post from an idea
    pub topic: Option<String>,
    pub aspect: Option<String>,

    // Event announcement
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub event_location: Option<String>,
    pub event_audience: Option<String>,

    // Image generation
    pub subject: Option<String>,
    pub background: Option<String>,

    // Content plan
    pub period: Option<String>,
    pub theme: Option<String>,
}

impl Draft {
    pub fn clear(&mut self) {
        *self = Draft::default();
    }
}

/// State of one chat's conversation
#[derive(Debug, Clone)]
pub struct Session {
    pub state: DialogState,
    /// Profile collected this session; persisted copies are loaded on
    /// demand when this is `None`
    pub profile: Option<NgoProfile>,
    pub draft: Draft,
}

impl Session {
    /// Fresh session at the entry menu
    pub fn new() -> Self {
        Self {
            state: DialogState::MainMenu,
            profile: None,
            draft: Draft::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory session store keyed by chat id
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the session for a chat, if the chat has one
    pub async fn snapshot(&self, chat_id: i64) -> Option<Session> {
        self.inner.lock().await.get(&chat_id).cloned()
    }

    /// Write a session back
    pub async fn store(&self, chat_id: i64, session: Session) {
        self.inner.lock().await.insert(chat_id, session);
    }

    /// Replace the chat's session with a fresh one (`/start`)
    pub async fn reset(&self, chat_id: i64) {
        self.inner.lock().await.insert(chat_id, Session::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_chat_has_no_session() {
        let store = SessionStore::new();
        assert!(store.snapshot(1).await.is_none());
    }

    #[tokio::test]
    async fn test_store_and_snapshot() {
        let store = SessionStore::new();

        let mut session = Session::new();
        session.state = DialogState::PlanTheme;
        session.draft.period = Some("на неделю".to_string());
        store.store(7, session).await;

        let snapshot = store.snapshot(7).await.unwrap();
        assert_eq!(snapshot.state, DialogState::PlanTheme);
        assert_eq!(snapshot.draft.period.as_deref(), Some("на неделю"));
    }

    #[tokio::test]
    async fn test_reset_returns_to_main_menu() {
        let store = SessionStore::new();

        let mut session = Session::new();
        session.state = DialogState::EventDate;
        store.store(7, session).await;

        store.reset(7).await;

        let snapshot = store.snapshot(7).await.unwrap();
        assert_eq!(snapshot.state, DialogState::MainMenu);
        assert!(snapshot.draft.event_name.is_none());
    }

    #[test]
    fn test_draft_clear() {
        let mut draft = Draft {
            topic: Some("тема".to_string()),
            ..Default::default()
        };
        draft.clear();
        assert!(draft.topic.is_none());
    }
}
