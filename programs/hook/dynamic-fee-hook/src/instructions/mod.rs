pub mod initialize_hook;
pub mod set_global_max_adj_rate;
pub mod set_poker;
pub mod pause_hook;
pub mod unpause_hook;
pub mod activate_and_configure_pool;
pub mod activate_pool;
pub mod deactivate_pool;
pub mod set_pool_params;
pub mod poke;
pub mod compute_fee_update;

pub use initialize_hook::*;
pub use set_global_max_adj_rate::*;
pub use set_poker::*;
pub use pause_hook::*;
pub use unpause_hook::*;
pub use activate_and_configure_pool::*;
pub use activate_pool::*;
pub use deactivate_pool::*;
pub use set_pool_params::*;
pub use poke::*;
pub use compute_fee_update::*;
