use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Millisecond nonce source for signed requests.
///
/// The exchange rejects a nonce that is not greater than the last one it
/// accepted for the same credentials, so values handed out by one generator
/// are strictly increasing even when the wall clock stalls, steps backwards,
/// or several tasks sign concurrently.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce based on the current epoch time in milliseconds.
    pub fn next_nonce(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now)
    }

    /// Next nonce for a given clock reading: `now_ms` if it is ahead of the
    /// last value handed out, `last + 1` otherwise.
    pub(crate) fn next_at(&self, now_ms: u64) -> u64 {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_ms.max(current + 1);
            match self
                .last
                .compare_exchange(current, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}
