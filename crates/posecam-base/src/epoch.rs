use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// A shared generation counter for cancellation.
///
/// Every task started under a generation keeps the value it was started with.
/// `advance()` invalidates all of them at once; each task notices on its next
/// `is_current()` check and stops touching shared state.
#[derive(Clone, Debug)]
pub struct Epoch {
    value: Arc<AtomicU64>,
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

impl Epoch {
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Advance to the next generation and return it.
    pub fn advance(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current()
    }
}

/// A value tagged with the generation that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Stamped<T> {
    pub epoch: u64,
    pub inner: T,
}

impl<T> Stamped<T> {
    pub fn new(epoch: u64, inner: T) -> Self {
        Self { epoch, inner }
    }
}
