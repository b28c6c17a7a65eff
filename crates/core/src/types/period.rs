//! Rolling report window periods.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Rolling window length for performance reports.
///
/// A period `p` evaluated at time `now` covers `[now - p, now]`. Month-based
/// periods use calendar months, not fixed day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Semester,
    Year,
}

impl ReportPeriod {
    /// The inclusive lower bound of the rolling window ending at `now`.
    #[must_use]
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Week => now - Duration::weeks(1),
            Self::Month => sub_months(now, 1),
            Self::Quarter => sub_months(now, 3),
            Self::Semester => sub_months(now, 6),
            Self::Year => sub_months(now, 12),
        }
    }
}

/// Subtract calendar months, clamping on the (unreachable in practice)
/// out-of-range case.
fn sub_months(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Semester => write!(f, "semester"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "semester" => Ok(Self::Semester),
            "year" => Ok(Self::Year),
            _ => Err(format!("invalid period: {s}")),
        }
    }
}
