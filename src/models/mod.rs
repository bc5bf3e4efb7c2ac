pub mod case;
pub mod case_reward;
pub mod case_reward_type;
pub mod duration_unit;

pub use case::*;
pub use case_reward::*;
pub use case_reward_type::*;
pub use duration_unit::*;
