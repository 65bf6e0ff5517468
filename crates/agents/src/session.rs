use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sewa_core::ConversationSession;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, ConversationSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, session_id: &str) -> Option<ConversationSession> {
        self.inner.read().get(session_id).cloned()
    }

    pub fn upsert(&self, session: ConversationSession) {
        self.inner
            .write()
            .insert(session.session_id.clone(), session);
    }

    pub fn purge_expired(&self, now: DateTime<Utc>) -> u64 {
        let mut guard = self.inner.write();
        let before = guard.len();
        guard.retain(|_, session| session.expires_at > now);
        (before - guard.len()) as u64
    }
}
