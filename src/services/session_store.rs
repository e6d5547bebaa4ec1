use crate::models::session::Session;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory session registry keyed by the opaque session id. Entries are
/// never evicted; a long-running deployment accumulates one entry per
/// generated interview.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) {
        let mut guard = self.inner.write().expect("session store lock poisoned");
        guard.insert(session.id.clone(), session);
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let guard = self.inner.read().expect("session store lock poisoned");
        guard.get(id).cloned()
    }

    /// Records the evaluation outcome. Concurrent evaluations of the same
    /// session resolve last-writer-wins.
    pub fn set_outcome(&self, id: &str, score: f64, result: &str) -> bool {
        let mut guard = self.inner.write().expect("session store lock poisoned");
        match guard.get_mut(id) {
            Some(session) => {
                session.score = Some(score);
                session.result = Some(result.to_string());
                true
            }
            None => false,
        }
    }

    /// Score of an evaluated session; None when the id is unknown or the
    /// session has not been evaluated yet.
    pub fn score_of(&self, id: &str) -> Option<f64> {
        let guard = self.inner.read().expect("session store lock poisoned");
        guard.get(id).and_then(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
