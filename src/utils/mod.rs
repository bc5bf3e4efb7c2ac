pub mod duration;
pub mod logger;

pub use duration::{expires_at, get_duration};
