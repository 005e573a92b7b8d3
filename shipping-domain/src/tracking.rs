//! 运单号生成端口
//!
//! 运单号格式为 `前缀 + 毫秒时间戳`，例如 `TRK1704110400000`。
//! 同一毫秒内的多次生成会顺延到下一个毫秒值，保证同一生成器内唯一且递增。
//!
use crate::clock::Clock;
use crate::value_object::TrackingNumber;
use std::sync::atomic::{AtomicI64, Ordering};

pub const DEFAULT_TRACKING_PREFIX: &str = "TRK";

/// 运单号生成器
pub trait TrackingNumberGenerator: Send + Sync {
    fn next_tracking_number(&self) -> TrackingNumber;
}

pub struct TimestampTrackingNumbers<C> {
    prefix: String,
    clock: C,
    last: AtomicI64,
}

impl<C: Clock> TimestampTrackingNumbers<C> {
    pub fn new(prefix: impl Into<String>, clock: C) -> Self {
        Self {
            prefix: prefix.into(),
            clock,
            last: AtomicI64::new(0),
        }
    }
}

impl<C: Clock> TrackingNumberGenerator for TimestampTrackingNumbers<C> {
    fn next_tracking_number(&self) -> TrackingNumber {
        let now = self.clock.now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let token = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, token, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return TrackingNumber::new(format!("{}{}", self.prefix, token)),
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn digits_after<'a>(tn: &'a TrackingNumber, prefix: &str) -> &'a str {
        tn.as_str().strip_prefix(prefix).unwrap()
    }

    #[test]
    fn uses_prefix_and_clock_millis() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let numbers = TimestampTrackingNumbers::new(DEFAULT_TRACKING_PREFIX, FixedClock::new(at));

        let tn = numbers.next_tracking_number();
        assert_eq!(tn.as_str(), format!("TRK{}", at.timestamp_millis()));
    }

    #[test]
    fn same_millisecond_still_yields_unique_increasing_numbers() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let numbers = TimestampTrackingNumbers::new("TRK", FixedClock::new(at));

        let a = numbers.next_tracking_number();
        let b = numbers.next_tracking_number();
        let a: i64 = digits_after(&a, "TRK").parse().unwrap();
        let b: i64 = digits_after(&b, "TRK").parse().unwrap();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn concurrent_generation_never_collides() {
        let numbers = Arc::new(TimestampTrackingNumbers::new("TRK", SystemClock));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let numbers = Arc::clone(&numbers);
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| numbers.next_tracking_number())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for h in handles {
            for tn in h.join().unwrap() {
                assert!(digits_after(&tn, "TRK").chars().all(|c| c.is_ascii_digit()));
                assert!(seen.insert(tn));
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
