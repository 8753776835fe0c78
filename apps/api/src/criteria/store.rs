//! CriteriaStore — the most recently extracted criteria, one slot per session.
//!
//! Latest write wins. Nothing is persisted. Callers that never send a session id all share
//! `SessionId::default()`, which gives single-active-job semantics. Named sessions are capped:
//! once the cap is reached, setting a new one evicts the least recently set. The default
//! session is never evicted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SESSION: &str = "default";
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Ordered ranking criteria. Order drives both the prompt and the report column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingCriteria(Vec<String>);

impl RankingCriteria {
    /// Trims every criterion, drops blanks and exact duplicates, keeps first-seen order.
    pub fn normalized<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for item in raw {
            let item = item.as_ref().trim();
            if !item.is_empty() && !out.iter().any(|c| c == item) {
                out.push(item.to_string());
            }
        }
        Self(out)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SESSION
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(DEFAULT_SESSION.to_string())
    }
}

#[derive(Debug, Default)]
struct Slots {
    criteria: HashMap<SessionId, RankingCriteria>,
    /// Named sessions, least recently set first. The default session is not tracked here.
    recency: VecDeque<SessionId>,
}

#[derive(Debug, Clone)]
pub struct CriteriaStore {
    slots: Arc<RwLock<Slots>>,
    max_sessions: usize,
}

impl Default for CriteriaStore {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_SESSIONS)
    }
}

impl CriteriaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `max_sessions` named sessions alongside the default one.
    pub fn bounded(max_sessions: usize) -> Self {
        Self {
            slots: Arc::default(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Replaces whatever the session held before and marks it most recently set.
    pub fn set(&self, session: &SessionId, criteria: RankingCriteria) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);

        if !session.is_default() {
            slots.recency.retain(|s| s != session);
            slots.recency.push_back(session.clone());
            while slots.recency.len() > self.max_sessions {
                if let Some(evicted) = slots.recency.pop_front() {
                    slots.criteria.remove(&evicted);
                    debug!(session = evicted.as_str(), "evicted criteria session");
                }
            }
        }

        slots.criteria.insert(session.clone(), criteria);
    }

    /// `None` until the session's first successful extraction, or after its eviction.
    pub fn get(&self, session: &SessionId) -> Option<RankingCriteria> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .criteria
            .get(session)
            .cloned()
    }
}
