use serde::{Deserialize, Serialize};
use std::env;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CaseApiError, CaseApiResult};
use crate::models::CaseRewardType;

/// Raw case catalog as written in `cases.toml`.
///
/// ```toml
/// [[cases]]
/// id = "vote"
/// display_name = "Vote Case"
/// price = 250
///
/// [[cases.rewards]]
/// type = "GEMS"
/// chance = 70.0
/// gems = 50
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub id: String,
    pub display_name: String,
    /// Base64 item stack
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub glowing: bool,
    #[serde(default)]
    pub permission: String,
    #[serde(default)]
    pub rewards: Vec<RewardConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(rename = "type")]
    pub reward_type: CaseRewardType,
    /// Weight relative to the other rewards of the case
    pub chance: f64,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub broadcast: bool,
    /// Absent = unlimited
    pub max_draws: Option<u32>,
    /// Defaults to `max_draws`
    pub remaining_draws: Option<u32>,
    pub gems: Option<u32>,
    pub money: Option<f64>,
    pub command: Option<String>,
    pub permission: Option<String>,
    pub duration: Option<u64>,
    pub duration_unit: Option<String>,
}

impl CatalogConfig {
    /// Loads the catalog named by `CASE_CATALOG_PATH` (default `cases.toml`).
    ///
    /// A missing file yields an empty catalog. `CASE_DEFAULT_PERMISSION`, when
    /// set, fills in cases that declare no permission.
    pub fn from_toml() -> CaseApiResult<Self> {
        let path = env::var("CASE_CATALOG_PATH").unwrap_or_else(|_| "cases.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_path(&path)?
        } else {
            log::warn!("Case catalog {path} not found, starting with no cases");
            CatalogConfig::default()
        };

        if let Ok(v) = env::var("CASE_DEFAULT_PERMISSION") {
            config.apply_default_permission(&v);
        }

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CaseApiResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CaseApiError::ConfigError(format!(
                "Catalog file {} does not exist",
                path.display()
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(raw: &str) -> CaseApiResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_default_permission(&mut self, permission: &str) {
        for case in self.cases.iter_mut().filter(|c| c.permission.is_empty()) {
            case.permission = permission.to_string();
        }
    }
}
