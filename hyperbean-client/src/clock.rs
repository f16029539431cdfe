use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over current time for testability.
pub trait Clock: Send + Sync {
    fn unix_now_millis(&self) -> u64;
}

/// Production clock backed by `SystemTime`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
