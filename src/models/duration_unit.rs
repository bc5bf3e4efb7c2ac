use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CaseApiError;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Unit of a human-specified time span, e.g. how long a granted permission lasts.
///
/// Months and years are calendar approximations (30 and 365 days).
/// `Infinite` means the span never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Infinite,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 8] = [
        DurationUnit::Seconds,
        DurationUnit::Minutes,
        DurationUnit::Hours,
        DurationUnit::Days,
        DurationUnit::Weeks,
        DurationUnit::Months,
        DurationUnit::Years,
        DurationUnit::Infinite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Seconds => "SECONDS",
            DurationUnit::Minutes => "MINUTES",
            DurationUnit::Hours => "HOURS",
            DurationUnit::Days => "DAYS",
            DurationUnit::Weeks => "WEEKS",
            DurationUnit::Months => "MONTHS",
            DurationUnit::Years => "YEARS",
            DurationUnit::Infinite => "INFINITE",
        }
    }

    /// Length of one unit in seconds. `None` for `Infinite`.
    pub fn seconds(&self) -> Option<u64> {
        match self {
            DurationUnit::Seconds => Some(1),
            DurationUnit::Minutes => Some(SECS_PER_MINUTE),
            DurationUnit::Hours => Some(SECS_PER_HOUR),
            DurationUnit::Days => Some(SECS_PER_DAY),
            DurationUnit::Weeks => Some(7 * SECS_PER_DAY),
            DurationUnit::Months => Some(30 * SECS_PER_DAY),
            DurationUnit::Years => Some(365 * SECS_PER_DAY),
            DurationUnit::Infinite => None,
        }
    }

    /// Case-insensitive lookup. Unknown tokens yield `None`.
    /// Folding is ASCII-only, so a dotless `ı` never matches `i`.
    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationUnit {
    type Err = CaseApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s).ok_or_else(|| CaseApiError::UnknownVariant {
            kind: "duration unit",
            value: s.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for DurationUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
