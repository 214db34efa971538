//! Gateway-wide bookkeeping of live sessions.
//!
//! Holds counters only. Capture settings and pipeline state stay inside each
//! session and are never reachable from here.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

/// Per-session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub turns: u64,
    pub failed_turns: u64,
    pub duration_ms: u64,
}

#[derive(Debug)]
struct Entry {
    opened_at: Instant,
    turns: u64,
    failed_turns: u64,
}

#[derive(Debug, Default)]
struct Inner {
    live: HashMap<String, Entry>,
    total_opened: u64,
    total_turns: u64,
}

/// Aggregate counters for `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub active_sessions: usize,
    pub total_sessions: u64,
    pub total_turns: u64,
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: Mutex<Inner>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return its id.
    pub fn open(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut inner = self.inner.lock();
        inner.live.insert(
            id.clone(),
            Entry {
                opened_at: Instant::now(),
                turns: 0,
                failed_turns: 0,
            },
        );
        inner.total_opened += 1;
        id
    }

    /// Count a finished turn. Unknown ids are ignored.
    pub fn record_turn(&self, session_id: &str, ok: bool) {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.live.get_mut(session_id) else {
            return;
        };
        entry.turns += 1;
        if !ok {
            entry.failed_turns += 1;
        }
        inner.total_turns += 1;
    }

    /// Remove a session and return its final counters.
    pub fn close(&self, session_id: &str) -> Option<SessionStats> {
        let entry = self.inner.lock().live.remove(session_id)?;
        Some(SessionStats {
            turns: entry.turns,
            failed_turns: entry.failed_turns,
            duration_ms: super::outcome::elapsed_ms(entry.opened_at),
        })
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().live.len()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let inner = self.inner.lock();
        RegistrySnapshot {
            active_sessions: inner.live.len(),
            total_sessions: inner.total_opened,
            total_turns: inner.total_turns,
        }
    }
}
