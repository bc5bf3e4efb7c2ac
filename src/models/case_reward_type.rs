use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CaseApiError;

/// The kind of payload a case reward hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseRewardType {
    Item,
    Gems,
    Money,
    Command,
    Permission,
}

impl CaseRewardType {
    pub const ALL: [CaseRewardType; 5] = [
        CaseRewardType::Item,
        CaseRewardType::Gems,
        CaseRewardType::Money,
        CaseRewardType::Command,
        CaseRewardType::Permission,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseRewardType::Item => "ITEM",
            CaseRewardType::Gems => "GEMS",
            CaseRewardType::Money => "MONEY",
            CaseRewardType::Command => "COMMAND",
            CaseRewardType::Permission => "PERMISSION",
        }
    }

    /// Case-insensitive lookup. Unknown tokens yield `None`.
    /// Folding is ASCII-only, so a dotless `ı` never matches `i`.
    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for CaseRewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseRewardType {
    type Err = CaseApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s).ok_or_else(|| CaseApiError::UnknownVariant {
            kind: "reward type",
            value: s.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for CaseRewardType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
