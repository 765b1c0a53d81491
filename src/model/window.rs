use std::fmt;

use serde::Serialize;

/// Kind of maintenance window; each has a fixed length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    FiveDay,
    ThreeDay,
    TwoDay,
}

impl WindowKind {
    pub const ALL: [WindowKind; 3] = [Self::FiveDay, Self::ThreeDay, Self::TwoDay];

    pub fn length(self) -> usize {
        match self {
            Self::FiveDay => 5,
            Self::ThreeDay => 3,
            Self::TwoDay => 2,
        }
    }

    /// Variable name prefix used in the decision model.
    pub fn var_prefix(self) -> &'static str {
        match self {
            Self::FiveDay => "start5",
            Self::ThreeDay => "start3",
            Self::TwoDay => "start2",
        }
    }

    /// Earliest start day whose window still covers `day`, clipped at day 1.
    pub fn first_covering_start(self, day: usize) -> usize {
        (day + 1).saturating_sub(self.length()).max(1)
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-day", self.length())
    }
}

/// Maintenance strategy: one long window or a 3-day + 2-day pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SingleWindow,
    SplitWindows,
}

impl Strategy {
    /// Window kinds the strategy schedules, in report order.
    pub fn windows(self) -> &'static [WindowKind] {
        match self {
            Self::SingleWindow => &[WindowKind::FiveDay],
            Self::SplitWindows => &[WindowKind::ThreeDay, WindowKind::TwoDay],
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleWindow => write!(f, "5-day maintenance"),
            Self::SplitWindows => write!(f, "3-day + 2-day maintenance"),
        }
    }
}

/// A window of a given kind starting on a 1-indexed day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaintenanceWindow {
    pub kind: WindowKind,
    pub start_day: usize,
}

impl MaintenanceWindow {
    /// Days covered inside `1..=horizon`; windows running past the horizon are truncated.
    pub fn days(&self, horizon: usize) -> std::ops::RangeInclusive<usize> {
        let last = (self.start_day + self.kind.length() - 1).min(horizon);
        self.start_day..=last
    }
}
