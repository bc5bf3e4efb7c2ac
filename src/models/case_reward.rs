use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::error::{CaseApiError, CaseApiResult};
use crate::models::CaseRewardType;

/// Read view of one weighted outcome inside a case.
///
/// Rewards are shared behind `Arc` between the catalog and the events that
/// mention them, so the draw counter is the only mutable state and is
/// updated through `&self`.
pub trait CaseReward: Send + Sync + Debug {
    fn reward_type(&self) -> CaseRewardType;

    /// Normalized probability of this reward given the summed chance of
    /// every candidate reward.
    fn win_chance(&self, total_chance: f64) -> f64 {
        if total_chance > 0.0 && total_chance.is_finite() {
            self.chance() / total_chance
        } else {
            0.0
        }
    }

    /// Base chance (weight) of the reward.
    fn chance(&self) -> f64;

    fn item_stack_base64(&self) -> &str;

    /// Whether winning this reward is broadcast to the server.
    fn is_with_broadcast_message(&self) -> bool;

    /// Position of the reward inside its case.
    fn index(&self) -> u32;

    fn is_limited(&self) -> bool;

    /// Unlimited rewards are always available, limited ones while draws remain.
    fn is_available(&self) -> bool {
        !self.is_limited() || self.remaining_draws() > 0
    }

    /// Maximum number of draws. Meaningless (0) for unlimited rewards.
    fn max_draws(&self) -> u32;

    /// Draws left. Meaningless (0) for unlimited rewards.
    fn remaining_draws(&self) -> u32;

    /// Consumes one draw. Returns `false` if a limited reward is exhausted.
    fn reduce_remaining_draws(&self) -> bool;

    fn gems_amount(&self) -> Option<u32>;

    fn money_amount(&self) -> Option<f64>;

    fn command(&self) -> Option<&str>;

    /// Permission node granted by the reward.
    fn permission(&self) -> Option<&str>;

    /// How long the granted permission lasts. `Duration::ZERO` means forever.
    fn permission_duration(&self) -> Option<Duration>;
}

/// What a reward hands out. The variant decides the reward type.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardPayload {
    Item,
    Gems(u32),
    Money(f64),
    Command(String),
    Permission { node: String, duration: Duration },
}

impl RewardPayload {
    pub fn reward_type(&self) -> CaseRewardType {
        match self {
            RewardPayload::Item => CaseRewardType::Item,
            RewardPayload::Gems(_) => CaseRewardType::Gems,
            RewardPayload::Money(_) => CaseRewardType::Money,
            RewardPayload::Command(_) => CaseRewardType::Command,
            RewardPayload::Permission { .. } => CaseRewardType::Permission,
        }
    }
}

#[derive(Debug)]
pub struct RewardDefinition {
    payload: RewardPayload,
    chance: f64,
    item_stack_base64: String,
    broadcast: bool,
    index: u32,
    max_draws: Option<u32>,
    remaining_draws: AtomicU32,
}

impl RewardDefinition {
    pub fn new(payload: RewardPayload, chance: f64, item_stack_base64: impl Into<String>) -> Self {
        Self {
            payload,
            chance,
            item_stack_base64: item_stack_base64.into(),
            broadcast: false,
            index: 0,
            max_draws: None,
            remaining_draws: AtomicU32::new(0),
        }
    }

    /// Caps the reward at `max` draws with `remaining` of them left.
    pub fn limited(mut self, max: u32, remaining: u32) -> CaseApiResult<Self> {
        if remaining > max {
            return Err(CaseApiError::ValidationError(format!(
                "Remaining draws ({remaining}) exceed max draws ({max})"
            )));
        }
        self.max_draws = Some(max);
        self.remaining_draws = AtomicU32::new(remaining);
        Ok(self)
    }

    pub fn with_broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn set_index(&mut self, index: u32) -> &mut Self {
        self.index = index;
        self
    }

    pub fn payload(&self) -> &RewardPayload {
        &self.payload
    }
}

impl CaseReward for RewardDefinition {
    fn reward_type(&self) -> CaseRewardType {
        self.payload.reward_type()
    }

    fn chance(&self) -> f64 {
        self.chance
    }

    fn item_stack_base64(&self) -> &str {
        &self.item_stack_base64
    }

    fn is_with_broadcast_message(&self) -> bool {
        self.broadcast
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn is_limited(&self) -> bool {
        self.max_draws.is_some()
    }

    fn max_draws(&self) -> u32 {
        self.max_draws.unwrap_or(0)
    }

    fn remaining_draws(&self) -> u32 {
        if self.is_limited() {
            self.remaining_draws.load(Ordering::Acquire)
        } else {
            0
        }
    }

    fn reduce_remaining_draws(&self) -> bool {
        if !self.is_limited() {
            return true;
        }
        self.remaining_draws
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1))
            .is_ok()
    }

    fn gems_amount(&self) -> Option<u32> {
        match self.payload {
            RewardPayload::Gems(amount) => Some(amount),
            _ => None,
        }
    }

    fn money_amount(&self) -> Option<f64> {
        match self.payload {
            RewardPayload::Money(amount) => Some(amount),
            _ => None,
        }
    }

    fn command(&self) -> Option<&str> {
        match &self.payload {
            RewardPayload::Command(cmd) => Some(cmd),
            _ => None,
        }
    }

    fn permission(&self) -> Option<&str> {
        match &self.payload {
            RewardPayload::Permission { node, .. } => Some(node),
            _ => None,
        }
    }

    fn permission_duration(&self) -> Option<Duration> {
        match self.payload {
            RewardPayload::Permission { duration, .. } => Some(duration),
            _ => None,
        }
    }
}
