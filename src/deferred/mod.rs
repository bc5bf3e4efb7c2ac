//! Deferred results for operations whose backing state lives off the game
//! loop thread.
//!
//! A [`FutureResult`] resolves once, either with a value or a
//! [`CaseApiError`](crate::CaseApiError). Where its callbacks run is decided by
//! the [`Scheduler`] it was created with, so an implementation can hand results
//! back to the server's tick thread through a [`TickQueue`].

pub mod future_result;
pub mod scheduler;

pub use future_result::*;
pub use scheduler::*;
