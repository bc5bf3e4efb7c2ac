pub mod case_events;
pub mod listener;
pub mod registry;

pub use case_events::*;
pub use listener::*;
pub use registry::*;
