//! Priority tiers and the registration-order sort key

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Coarse priority tier of a listener.
///
/// Lower numeric values dispatch earlier: `Highest` listeners run first,
/// `Lowest` listeners run last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Priority {
    Highest = -1000,
    Higher = -100,
    High = -10,
    #[default]
    Normal = 0,
    Low = 10,
    Lower = 100,
    Lowest = 1000,
}

impl Priority {
    /// Numeric tier value
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Sort key of a registration: tier first, then registration sequence.
///
/// Field order matters, the derived `Ord` compares `tier` before `sequence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey {
    pub tier: i32,
    pub sequence: u64,
}

impl PriorityKey {
    pub fn new(priority: Priority, sequence: u64) -> Self {
        Self {
            tier: priority.value(),
            sequence,
        }
    }
}

static GLOBAL_SEQUENCE: Lazy<Arc<SequenceCounter>> = Lazy::new(|| Arc::new(SequenceCounter::new()));

/// Monotonic registration counter.
///
/// Starts at zero and hands out every value exactly once, also when
/// several emitters on several threads register at the same time.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    /// Create a fresh counter starting at zero
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Process-wide counter shared by every emitter built without its own.
    pub fn global() -> Arc<SequenceCounter> {
        Arc::clone(&GLOBAL_SEQUENCE)
    }

    /// Take the next sequence value
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Value the next call to [`next`](Self::next) will return
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
