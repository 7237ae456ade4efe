//! Monotonic, thread-safe counters used throughout the pipeline.
//!
//! A [`Counter`] is cheap to clone (it's a shared [`AtomicI64`]) and is the
//! Rust-idiomatic replacement for the actor-goroutine counter of the Go
//! implementation this tool was ported from: the invariants it must uphold
//! (monotonic `add`, atomic `load`, no torn reads, no cross-counter
//! ordering) are exactly what a single atomic word already gives us.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicI64>);

impl Counter {
    pub fn new() -> Self {
        Self(Arc::new(AtomicI64::new(0)))
    }

    /// Adds `value` to the counter. `value` is expected to be non-negative;
    /// counters only ever increase.
    pub fn add(&self, value: i64) {
        self.0.fetch_add(value, Ordering::Relaxed);
    }

    pub fn increment(&self) {
        self.add(1);
    }

    pub fn load(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Counter({})", self.load())
    }
}
