use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use fixtura_core::Value;

/// Generator for the n-th value of a sequence.
pub type SequenceFn = Arc<dyn Fn(u64) -> Value + Send + Sync>;

/// Monotonic counter feeding a value generator: yields `f(1)`, `f(2)`, ...
pub struct Sequence {
    counter: AtomicU64,
    generator: SequenceFn,
}

impl Sequence {
    pub fn new<F>(generator: F) -> Self
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        Self {
            counter: AtomicU64::new(0),
            generator: Arc::new(generator),
        }
    }

    /// Step the counter and produce the next value.
    pub fn next_value(&self) -> Value {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        (self.generator)(n)
    }

    /// How many values have been produced.
    pub fn position(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}
