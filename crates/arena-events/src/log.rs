//! Append-only, hash-chained event log
//!
//! The log is owned by the execution environment. Appends happen while a
//! scenario runs; validation reads a finalized snapshot afterwards, so the
//! lock is never contended across a write/read boundary.

use crate::event::{Event, EventId};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The hash chain does not verify
    #[error("event log integrity violation")]
    IntegrityViolation,
}

/// Append-only ordered sequence of events
#[derive(Debug, Default)]
pub struct EventLog {
    inner: Mutex<Vec<Event>>,
}

impl EventLog {
    /// Create new empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, linking it into the hash chain
    pub fn append(&self, mut event: Event) -> EventId {
        let mut guard = self.inner.lock();
        event.prev_hash = guard.last().map_or([0u8; 32], |e| e.hash);
        event.hash = compute_hash(&event);
        let id = event.event_id;
        guard.push(event);
        id
    }

    /// Ordered snapshot of all events
    #[must_use]
    pub fn list_view(&self) -> Vec<Event> {
        self.inner.lock().clone()
    }

    /// Number of recorded events
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Re-walk the hash chain and verify every link
    ///
    /// # Errors
    /// `LogError::IntegrityViolation` if any event's chain link or hash
    /// does not match.
    pub fn verify_integrity(&self) -> Result<(), LogError> {
        let guard = self.inner.lock();
        let mut prev = [0u8; 32];
        for e in guard.iter() {
            if e.prev_hash != prev {
                return Err(LogError::IntegrityViolation);
            }
            if e.hash != compute_hash(e) {
                return Err(LogError::IntegrityViolation);
            }
            prev = e.hash;
        }
        Ok(())
    }
}

fn compute_hash(event: &Event) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(event.event_id.0.to_bytes());
    hasher.update([event.event_type.as_u8()]);
    hasher.update(event.timestamp.to_le_bytes());
    hasher.update(event.action.class_name.as_bytes());
    hasher.update([0]);
    hasher.update(event.action.function_name.as_bytes());
    hasher.update([0]);
    for (key, value) in &event.action.args {
        hasher.update(key.as_bytes());
        hasher.update([0]);
        hasher.update(value.to_string().as_bytes());
        hasher.update([0]);
    }
    hasher.update(event.prev_hash);
    hasher.finalize().into()
}
