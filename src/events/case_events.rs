use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Case, CaseReward};

/// Events whose action is aborted when a listener cancels them.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}

/// A player is about to open a case. Cancelling it keeps the case closed.
#[derive(Debug, Clone)]
pub struct CaseOpenEvent {
    player_uuid: Uuid,
    case: Arc<dyn Case>,
    cancelled: bool,
}

impl CaseOpenEvent {
    pub fn new(player_uuid: Uuid, case: Arc<dyn Case>) -> Self {
        Self {
            player_uuid,
            case,
            cancelled: false,
        }
    }

    pub fn player_uuid(&self) -> Uuid {
        self.player_uuid
    }

    pub fn case(&self) -> &Arc<dyn Case> {
        &self.case
    }
}

impl Cancellable for CaseOpenEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// A player finished opening a case and won `case_reward`.
#[derive(Debug, Clone)]
pub struct CaseOpenCompleteEvent {
    player_uuid: Uuid,
    case: Arc<dyn Case>,
    case_reward: Arc<dyn CaseReward>,
}

impl CaseOpenCompleteEvent {
    pub fn new(player_uuid: Uuid, case: Arc<dyn Case>, case_reward: Arc<dyn CaseReward>) -> Self {
        Self {
            player_uuid,
            case,
            case_reward,
        }
    }

    pub fn player_uuid(&self) -> Uuid {
        self.player_uuid
    }

    pub fn case(&self) -> &Arc<dyn Case> {
        &self.case
    }

    pub fn case_reward(&self) -> &Arc<dyn CaseReward> {
        &self.case_reward
    }
}

/// A player tried to open a case and could not.
#[derive(Debug, Clone)]
pub struct FailedCaseOpenEvent {
    player_uuid: Uuid,
    case: Arc<dyn Case>,
}

impl FailedCaseOpenEvent {
    pub fn new(player_uuid: Uuid, case: Arc<dyn Case>) -> Self {
        Self { player_uuid, case }
    }

    pub fn player_uuid(&self) -> Uuid {
        self.player_uuid
    }

    pub fn case(&self) -> &Arc<dyn Case> {
        &self.case
    }
}

/// A reward is about to be announced. Listeners may rewrite the message or
/// cancel the announcement.
#[derive(Debug, Clone)]
pub struct CaseRewardAnnounceEvent {
    player_uuid: Uuid,
    case: Arc<dyn Case>,
    case_reward: Arc<dyn CaseReward>,
    announce_message: String,
    cancelled: bool,
}

impl CaseRewardAnnounceEvent {
    pub fn new(
        player_uuid: Uuid,
        case: Arc<dyn Case>,
        case_reward: Arc<dyn CaseReward>,
        announce_message: impl Into<String>,
    ) -> Self {
        Self {
            player_uuid,
            case,
            case_reward,
            announce_message: announce_message.into(),
            cancelled: false,
        }
    }

    pub fn player_uuid(&self) -> Uuid {
        self.player_uuid
    }

    pub fn case(&self) -> &Arc<dyn Case> {
        &self.case
    }

    pub fn case_reward(&self) -> &Arc<dyn CaseReward> {
        &self.case_reward
    }

    pub fn announce_message(&self) -> &str {
        &self.announce_message
    }

    pub fn set_announce_message(&mut self, announce_message: impl Into<String>) {
        self.announce_message = announce_message.into();
    }
}

impl Cancellable for CaseRewardAnnounceEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseDefinition, RewardDefinition, RewardPayload};

    fn vote_case() -> Arc<dyn Case> {
        Arc::new(CaseDefinition {
            id: "vote".into(),
            display_name: "Vote Case".into(),
            item_stack_base64: String::new(),
            price: 100,
            glowing: true,
            permission: "cases.vote".into(),
        })
    }

    fn gems_reward() -> Arc<dyn CaseReward> {
        Arc::new(RewardDefinition::new(RewardPayload::Gems(5), 10.0, ""))
    }

    #[test]
    fn test_case_open_event_cancellation() {
        let player = Uuid::new_v4();
        let mut event = CaseOpenEvent::new(player, vote_case());
        assert!(!event.is_cancelled());
        assert_eq!(event.player_uuid(), player);
        assert_eq!(event.case().case_id(), "vote");

        event.set_cancelled(true);
        assert!(event.is_cancelled());
        event.set_cancelled(false);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_announce_message_is_mutable() {
        let mut event =
            CaseRewardAnnounceEvent::new(Uuid::new_v4(), vote_case(), gems_reward(), "You won X!");
        assert_eq!(event.announce_message(), "You won X!");
        assert_eq!(event.announce_message(), "You won X!");
        assert!(!event.is_cancelled());

        event.set_announce_message("You won Y!");
        assert_eq!(event.announce_message(), "You won Y!");
        assert_eq!(event.case_reward().gems_amount(), Some(5));
    }

    #[test]
    fn test_notification_events_carry_context() {
        let player = Uuid::new_v4();
        let complete = CaseOpenCompleteEvent::new(player, vote_case(), gems_reward());
        assert_eq!(complete.player_uuid(), player);
        assert_eq!(complete.case().price(), 100);
        assert_eq!(complete.case_reward().chance(), 10.0);

        let failed = FailedCaseOpenEvent::new(player, vote_case());
        assert_eq!(failed.player_uuid(), player);
        assert!(failed.case().is_with_glowing());
    }
}
