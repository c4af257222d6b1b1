//! Wall-clock capability.
//!
//! The gatekeeper needs both an absolute instant (for the last-notification
//! timestamp) and the local hour of day (for quiet hours), so the clock hands
//! out local time with its UTC offset attached.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The system clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant. Used for dry runs (`notify-check --at`) and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_instant() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T14:00:00+03:00").unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_system_clock_is_close_to_utc_now() {
        let now = SystemClock.now();
        let delta = (chrono::Utc::now() - now.to_utc()).num_seconds().abs();
        assert!(delta < 5);
    }
}
