pub mod fee_slot;
pub mod guards;
pub mod hook_config;
pub mod pool_params;
pub mod pool_state;

pub use fee_slot::*;
pub use guards::*;
pub use hook_config::*;
pub use pool_params::*;
pub use pool_state::*;
