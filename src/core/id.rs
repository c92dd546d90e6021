//! Identifier allocation for newly created records

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces a new unique identifier on every call
///
/// Controllers never invent ids themselves; they ask the source injected
/// into the [`ServerHost`](crate::server::ServerHost).
pub trait IdentifierSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// 32-character lowercase hex ids backed by random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdentifierSource for RandomIdSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `<prefix><n>` ids, counting from 1
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdentifierSource for SequentialIdSource {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }
}
