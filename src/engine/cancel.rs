//! Module defining the cooperative cancellation signal shared between a caller and the producer

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Level-triggered cancellation flag. Once cancelled, every clone observes the request on every later check.
///
/// The producer checks the token between cells only, a cell which is being decoded is always completed.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Never blocks; repeated calls have no further effect.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
