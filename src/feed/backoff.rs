//! Reconnect pacing shared by the native client and the browser overlay

use std::time::Duration;

const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 30_000;

/// Delay before reconnect number `attempt` (0-based). The server's `retry`
/// hint, when present, is a lower bound.
pub fn backoff_delay(attempt: u32, retry_hint: Option<Duration>) -> Duration {
    let exp = INITIAL_BACKOFF_MS.saturating_mul(1u64 << attempt.min(16));
    let delay = Duration::from_millis(exp.min(MAX_BACKOFF_MS));

    match retry_hint {
        Some(hint) if hint > delay => hint,
        _ => delay,
    }
}
