//! Time source abstraction
//!
//! The communication loop needs two things from time: a monotonic
//! millisecond counter for the watchdog and a way to sleep between
//! polls. Sleeping comes from `embedded_hal::delay::DelayNs`.

use embedded_hal::delay::DelayNs;

/// Monotonic clock with blocking delays
pub trait Clock: DelayNs {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `since_ms`
    fn elapsed_ms(&self, since_ms: u64) -> u64 {
        self.now_ms().saturating_sub(since_ms)
    }
}
