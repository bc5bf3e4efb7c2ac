use super::{CaseOpenCompleteEvent, CaseOpenEvent, CaseRewardAnnounceEvent, FailedCaseOpenEvent};

/// Receives case opening events. Every hook defaults to doing nothing.
///
/// Hooks run synchronously on the dispatching thread, in registration order.
pub trait CaseOpeningEventListener: Send + Sync {
    /// A player is about to open a case. Cancelling prevents the opening.
    fn on_case_open(&self, _event: &mut CaseOpenEvent) {}

    fn on_case_open_complete(&self, _event: &CaseOpenCompleteEvent) {}

    fn on_failed_case_open(&self, _event: &FailedCaseOpenEvent) {}

    /// A reward announcement is about to be sent. The message may be
    /// rewritten; cancelling suppresses it.
    fn on_case_reward_announce(&self, _event: &mut CaseRewardAnnounceEvent) {}
}
