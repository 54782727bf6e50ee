//! Strictly increasing nonce counter for authenticated requests
//!
//! BTC-e rejects any authenticated request whose nonce is not strictly
//! greater than the last one it accepted for the API key. The counter
//! here is process-local; two client instances sharing one key will race
//! server-side, and callers must arrange for a single writer per key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic nonce source
///
/// Seeded from Unix wall-clock seconds by default so a fresh process
/// starts ahead of any previous second-granularity run. An explicit seed
/// takes precedence, which keeps tests deterministic and allows resuming
/// from a known server value.
#[derive(Debug)]
pub struct NonceSource {
    counter: AtomicU64,
}

impl NonceSource {
    /// Create a nonce source seeded from the current Unix time
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_secs();

        Self::with_seed(seed)
    }

    /// Create a nonce source with an explicit seed
    ///
    /// The first call to [`next`](Self::next) returns `seed + 1`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }

    /// Increment the counter and return the new value
    ///
    /// Atomic, so concurrent callers within one process always observe
    /// unique, strictly increasing values.
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Overwrite the counter with a server-reported value
    ///
    /// Called when the server rejects a nonce and names the value it
    /// last accepted; the following [`next`](Self::next) yields
    /// `server_nonce + 1`. Prior counter state is discarded without any
    /// bounds check: the server value is trusted for exactly one retry.
    pub fn resync(&self, server_nonce: u64) {
        self.counter.store(server_nonce, Ordering::SeqCst);
    }
}

impl Default for NonceSource {
    fn default() -> Self {
        Self::new()
    }
}
