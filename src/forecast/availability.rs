//! Per-day legality of starting a maintenance window.

use serde::{Deserialize, Serialize};

/// Inclusive range of 1-indexed days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayRange {
    /// First day (inclusive).
    pub start: usize,
    /// Last day (inclusive).
    pub end: usize,
}

impl DayRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, day: usize) -> bool {
        (self.start..=self.end).contains(&day)
    }
}

/// Availability flags for days `1..=horizon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    flags: Vec<bool>,
}

impl Availability {
    /// Every day may start a window.
    pub fn full(horizon: usize) -> Self {
        Self {
            flags: vec![true; horizon],
        }
    }

    /// Full availability except the given blackout ranges.
    ///
    /// Ranges are clipped to the horizon; days outside `1..=horizon` are
    /// ignored.
    pub fn with_blackouts(horizon: usize, blackouts: &[DayRange]) -> Self {
        let flags = (1..=horizon)
            .map(|day| !blackouts.iter().any(|r| r.contains(day)))
            .collect();
        Self { flags }
    }

    pub fn horizon(&self) -> usize {
        self.flags.len()
    }

    /// Whether a window may start on `day`. Days outside the horizon are unavailable.
    pub fn is_available(&self, day: usize) -> bool {
        day.checked_sub(1)
            .and_then(|i| self.flags.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Days on which no window may start, in ascending order.
    pub fn blocked_days(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, ok)| !**ok)
            .map(|(i, _)| i + 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_marks_every_day() {
        let a = Availability::full(5);
        assert_eq!(a.horizon(), 5);
        assert!((1..=5).all(|d| a.is_available(d)));
        assert!(a.blocked_days().is_empty());
    }

    #[test]
    fn blackout_is_inclusive() {
        let a = Availability::with_blackouts(10, &[DayRange::new(4, 6)]);
        assert_eq!(a.blocked_days(), vec![4, 5, 6]);
        assert!(a.is_available(3));
        assert!(a.is_available(7));
    }

    #[test]
    fn blackout_past_horizon_is_clipped() {
        let a = Availability::with_blackouts(5, &[DayRange::new(4, 50)]);
        assert_eq!(a.horizon(), 5);
        assert_eq!(a.blocked_days(), vec![4, 5]);
    }

    #[test]
    fn out_of_range_days_are_unavailable() {
        let a = Availability::full(3);
        assert!(!a.is_available(0));
        assert!(!a.is_available(4));
    }
}
