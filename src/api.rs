//! The case opening contract.
//!
//! A server-side implementation provides [`CaseApi`]; other plugins consume
//! it. Every accessor that touches persisted player state returns a
//! [`FutureResult`] instead of blocking the game loop.
//!
//! When a case is opened, implementations dispatch events through their
//! [`ListenerRegistry`](crate::events::ListenerRegistry) in this order:
//!
//! 1. [`CaseOpenEvent`](crate::events::CaseOpenEvent), aborting if cancelled;
//! 2. reward selection;
//! 3. [`CaseOpenCompleteEvent`](crate::events::CaseOpenCompleteEvent) or
//!    [`FailedCaseOpenEvent`](crate::events::FailedCaseOpenEvent);
//! 4. [`CaseRewardAnnounceEvent`](crate::events::CaseRewardAnnounceEvent) for
//!    broadcast rewards, skipping the announcement if cancelled.

use uuid::Uuid;

use crate::deferred::FutureResult;
use crate::events::SharedListener;

pub trait CaseApi: Send + Sync {
    /// Whether a case with this id exists.
    fn case_exists(&self, case_id: &str) -> FutureResult<bool>;

    /// Opens a case for the player, consuming one of their copies.
    /// Resolves to `true` if the case was opened.
    fn open_case_with_remove(&self, player_uuid: Uuid, case_id: &str) -> FutureResult<bool>;

    /// Opens a case for the player without consuming a copy.
    fn open_case_without_remove(&self, player_uuid: Uuid, case_id: &str) -> FutureResult<bool>;

    /// Shows the case preview to the player.
    fn open_case_preview(&self, player_uuid: Uuid, case_id: &str);

    fn set_jewelry(&self, player_uuid: Uuid, amount: u32) -> FutureResult<()>;

    fn add_jewelry(&self, player_uuid: Uuid, amount: u32) -> FutureResult<()>;

    fn remove_jewelry(&self, player_uuid: Uuid, amount: u32) -> FutureResult<()>;

    fn set_cases(&self, player_uuid: Uuid, case_id: &str, amount: u32) -> FutureResult<()>;

    fn add_cases(&self, player_uuid: Uuid, case_id: &str, amount: u32) -> FutureResult<()>;

    fn remove_cases(&self, player_uuid: Uuid, case_id: &str, amount: u32) -> FutureResult<()>;

    /// Current jewelry balance of the player.
    fn get_jewelry(&self, player_uuid: Uuid) -> FutureResult<u32>;

    /// Number of copies of `case_id` the player owns.
    fn get_player_cases(&self, player_uuid: Uuid, case_id: &str) -> FutureResult<u32>;

    /// Cases opened on the server across all players.
    fn get_total_cases_opened(&self) -> FutureResult<u64>;

    fn get_total_cases_opened_by_player(&self, player_uuid: Uuid) -> FutureResult<u64>;

    /// Adds a listener. The most recently registered listener runs last,
    /// letting it override or react after the others.
    fn register_listener(&self, listener: SharedListener);

    fn unregister_listener(&self, listener: &SharedListener);
}
