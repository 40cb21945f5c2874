//! Communication continuity watchdog
//!
//! Each period the watchdog plants a marker and asks the panel for its
//! interface configuration. A reply clears the marker. Finding the marker
//! still planted at the next expiry means the panel went quiet.

/// Watchdog check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogStatus {
    /// Disabled by configuration
    Disabled,
    /// Period has not elapsed
    Ok,
    /// Period elapsed; time to probe again
    Expired {
        /// The previous probe went unanswered
        failed: bool,
    },
}

/// Liveness tracker for the serial link
#[derive(Debug, Clone)]
pub struct Watchdog {
    /// `None` when disabled
    period_ms: Option<u64>,
    last_reset_ms: u64,
    /// Probe sent and not yet answered
    marker_planted: bool,
    error_count: u32,
}

impl Watchdog {
    pub fn new(period_ms: Option<u64>, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_reset_ms: now_ms,
            marker_planted: false,
            error_count: 0,
        }
    }

    /// Record an Interface Configuration reply
    pub fn firmware_seen(&mut self) {
        self.marker_planted = false;
    }

    /// Check the period and restart it on expiry
    pub fn check(&mut self, now_ms: u64) -> WatchdogStatus {
        let Some(period_ms) = self.period_ms else {
            return WatchdogStatus::Disabled;
        };
        if now_ms.saturating_sub(self.last_reset_ms) < period_ms {
            return WatchdogStatus::Ok;
        }

        let failed = self.marker_planted;
        if failed {
            self.error_count = self.error_count.saturating_add(1);
        }
        self.last_reset_ms = now_ms;
        self.marker_planted = true;
        WatchdogStatus::Expired { failed }
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn is_enabled(&self) -> bool {
        self.period_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_expires() {
        let mut watchdog = Watchdog::new(None, 0);
        assert!(!watchdog.is_enabled());
        assert_eq!(watchdog.check(u64::MAX), WatchdogStatus::Disabled);
    }

    #[test]
    fn test_first_expiry_only_probes() {
        let mut watchdog = Watchdog::new(Some(60_000), 1_000);
        assert_eq!(watchdog.check(60_999), WatchdogStatus::Ok);
        assert_eq!(
            watchdog.check(61_000),
            WatchdogStatus::Expired { failed: false }
        );
        assert_eq!(watchdog.error_count(), 0);
    }

    #[test]
    fn test_answered_probe_is_not_a_failure() {
        let mut watchdog = Watchdog::new(Some(1_000), 0);
        watchdog.check(1_000);
        watchdog.firmware_seen();
        assert_eq!(
            watchdog.check(2_000),
            WatchdogStatus::Expired { failed: false }
        );
    }

    #[test]
    fn test_unanswered_probe_counts_failures() {
        let mut watchdog = Watchdog::new(Some(1_000), 0);
        watchdog.check(1_000);
        assert_eq!(watchdog.check(1_500), WatchdogStatus::Ok);
        assert_eq!(
            watchdog.check(2_000),
            WatchdogStatus::Expired { failed: true }
        );
        assert_eq!(
            watchdog.check(3_000),
            WatchdogStatus::Expired { failed: true }
        );
        assert_eq!(watchdog.error_count(), 2);
    }
}
