//! Rotating fairness counter used to break ranking ties across repeated
//! assignment calls. Injected as a collaborator so tests can pin the
//! rotation deterministically.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the monotonically increasing tie-break index. `next` is
/// advanced exactly once per assignment call.
pub trait FairnessCounter: Send + Sync {
    fn next(&self) -> u64;
}

/// Process-wide counter backed by a single atomic increment, so concurrent
/// callers can never skip or repeat an index.
#[derive(Debug, Default)]
pub struct AtomicFairnessCounter {
    sequence: AtomicU64,
}

impl AtomicFairnessCounter {
    pub const fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }
}

impl FairnessCounter for AtomicFairnessCounter {
    fn next(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

/// Counter pinned to one value; rotation becomes a pure function of input.
#[derive(Debug, Default)]
pub struct FixedCounter {
    value: u64,
}

impl FixedCounter {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }
}

impl FairnessCounter for FixedCounter {
    fn next(&self) -> u64 {
        self.value
    }
}
