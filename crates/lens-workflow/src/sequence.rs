//! Monotonic request numbering.
//!
//! Every request a controller issues gets the next number. A response is
//! committed only while its number is still the one recorded in the
//! controller state; anything older has been superseded.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue the next request number. The first is `1`.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued number, `0` before the first request.
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_latest(&self, request: u64) -> bool {
        self.latest() == request
    }
}
