use std::time::Instant;

/// Clock trait - source of monotonic time for TTL bookkeeping.
///
/// Cache implementations take a clock instead of calling `Instant::now()`
/// directly so tests can drive expiry deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
