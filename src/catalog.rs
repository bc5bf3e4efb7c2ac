use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;

use crate::config::{CaseConfig, CatalogConfig, RewardConfig};
use crate::error::{CaseApiError, CaseApiResult};
use crate::models::{
    Case, CaseDefinition, CaseReward, CaseRewardType, DurationUnit, RewardDefinition,
    RewardPayload,
};
use crate::utils::get_duration;

static CASE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("case id pattern is valid"));

#[derive(Debug)]
struct CatalogEntry {
    case: Arc<CaseDefinition>,
    rewards: Vec<Arc<RewardDefinition>>,
}

/// Validated, immutable set of cases and their rewards.
#[derive(Debug, Default)]
pub struct CaseCatalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl CaseCatalog {
    /// Validates `config` and assigns reward indices in declaration order.
    pub fn from_config(config: CatalogConfig) -> CaseApiResult<Self> {
        let mut catalog = CaseCatalog::default();
        for case in config.cases {
            if !CASE_ID.is_match(&case.id) {
                return Err(CaseApiError::ValidationError(format!(
                    "Invalid case id {:?}: use lowercase letters, digits, '_' or '-'",
                    case.id
                )));
            }
            if catalog.by_id.contains_key(&case.id) {
                return Err(CaseApiError::ValidationError(format!(
                    "Duplicate case id {}",
                    case.id
                )));
            }
            let entry = build_entry(case)?;
            catalog
                .by_id
                .insert(entry.case.id.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        log::debug!("Case catalog built with {} case(s)", catalog.len());
        Ok(catalog)
    }

    fn entry(&self, case_id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(case_id).map(|&i| &self.entries[i])
    }

    pub fn get(&self, case_id: &str) -> Option<Arc<dyn Case>> {
        self.entry(case_id)
            .map(|e| Arc::clone(&e.case) as Arc<dyn Case>)
    }

    pub fn contains(&self, case_id: &str) -> bool {
        self.by_id.contains_key(case_id)
    }

    /// Cases in declaration order.
    pub fn cases(&self) -> impl Iterator<Item = &Arc<CaseDefinition>> {
        self.entries.iter().map(|e| &e.case)
    }

    pub fn rewards(&self, case_id: &str) -> Option<&[Arc<RewardDefinition>]> {
        self.entry(case_id).map(|e| e.rewards.as_slice())
    }

    /// Sum of the chances of the rewards that can still be drawn, i.e. the
    /// normalization factor for [`CaseReward::win_chance`].
    pub fn total_chance(&self, case_id: &str) -> Option<f64> {
        self.entry(case_id).map(|e| {
            e.rewards
                .iter()
                .filter(|r| r.is_available())
                .map(|r| r.chance())
                .sum()
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_entry(case: CaseConfig) -> CaseApiResult<CatalogEntry> {
    let rewards = case
        .rewards
        .into_iter()
        .enumerate()
        .map(|(index, reward)| {
            build_reward(reward)
                .map(|r| Arc::new(r.with_index(index as u32)))
                .map_err(|e| match e {
                    CaseApiError::ValidationError(msg) => CaseApiError::ValidationError(format!(
                        "Case {} reward #{index}: {msg}",
                        case.id
                    )),
                    other => other,
                })
        })
        .collect::<CaseApiResult<Vec<_>>>()?;

    Ok(CatalogEntry {
        case: Arc::new(CaseDefinition {
            id: case.id,
            display_name: case.display_name,
            item_stack_base64: case.item,
            price: case.price,
            glowing: case.glowing,
            permission: case.permission,
        }),
        rewards,
    })
}

fn build_reward(cfg: RewardConfig) -> CaseApiResult<RewardDefinition> {
    if !cfg.chance.is_finite() || cfg.chance < 0.0 {
        return Err(invalid(format!("chance must be >= 0, got {}", cfg.chance)));
    }

    // Exactly the payload key belonging to the type may be set.
    let populated: Vec<&str> = [
        ("gems", cfg.gems.is_some()),
        ("money", cfg.money.is_some()),
        ("command", cfg.command.is_some()),
        ("permission", cfg.permission.is_some()),
    ]
    .into_iter()
    .filter_map(|(key, set)| set.then_some(key))
    .collect();
    let expected = match cfg.reward_type {
        CaseRewardType::Item => None,
        CaseRewardType::Gems => Some("gems"),
        CaseRewardType::Money => Some("money"),
        CaseRewardType::Command => Some("command"),
        CaseRewardType::Permission => Some("permission"),
    };
    if populated != expected.into_iter().collect::<Vec<_>>() {
        return Err(invalid(format!(
            "{} reward expects {} but has [{}]",
            cfg.reward_type,
            expected.unwrap_or("no payload key"),
            populated.join(", ")
        )));
    }

    if cfg.reward_type != CaseRewardType::Permission
        && (cfg.duration.is_some() || cfg.duration_unit.is_some())
    {
        return Err(invalid(format!(
            "{} reward does not take duration or duration_unit",
            cfg.reward_type
        )));
    }

    let payload = match cfg.reward_type {
        CaseRewardType::Item => {
            if cfg.item.is_empty() {
                return Err(invalid("ITEM reward needs an item".to_string()));
            }
            RewardPayload::Item
        }
        CaseRewardType::Gems => RewardPayload::Gems(cfg.gems.unwrap_or_default()),
        CaseRewardType::Money => {
            let amount = cfg.money.unwrap_or_default();
            if !amount.is_finite() || amount < 0.0 {
                return Err(invalid(format!("money must be >= 0, got {amount}")));
            }
            RewardPayload::Money(amount)
        }
        CaseRewardType::Command => {
            let command = cfg.command.unwrap_or_default();
            if command.trim().is_empty() {
                return Err(invalid("command must not be empty".to_string()));
            }
            RewardPayload::Command(command)
        }
        CaseRewardType::Permission => {
            let node = cfg.permission.unwrap_or_default();
            if node.trim().is_empty() {
                return Err(invalid("permission must not be empty".to_string()));
            }
            let duration = permission_duration(cfg.duration, cfg.duration_unit.as_deref())?;
            RewardPayload::Permission { node, duration }
        }
    };

    let reward = RewardDefinition::new(payload, cfg.chance, cfg.item).with_broadcast(cfg.broadcast);
    match (cfg.max_draws, cfg.remaining_draws) {
        (None, None) => Ok(reward),
        (Some(max), remaining) => reward.limited(max, remaining.unwrap_or(max)),
        (None, Some(_)) => Err(invalid(
            "remaining_draws requires max_draws".to_string(),
        )),
    }
}

/// No unit means the permission never expires.
fn permission_duration(amount: Option<u64>, unit: Option<&str>) -> CaseApiResult<Duration> {
    let Some(raw) = unit else {
        if amount.is_some() {
            return Err(invalid("duration requires duration_unit".to_string()));
        }
        return Ok(Duration::ZERO);
    };
    let unit = DurationUnit::from_string(raw)
        .ok_or_else(|| invalid(format!("unknown duration unit {raw:?}")))?;
    if unit == DurationUnit::Infinite {
        return Ok(Duration::ZERO);
    }
    match amount {
        Some(n) if n > 0 => Ok(get_duration(n, Some(unit))),
        _ => Err(invalid(format!(
            "duration must be > 0 when duration_unit is {unit}"
        ))),
    }
}

fn invalid(msg: String) -> CaseApiError {
    CaseApiError::ValidationError(msg)
}
