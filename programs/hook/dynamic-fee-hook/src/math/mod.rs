// Fixed-point math used by the fee engine and the JIT coordinator.
//
// Every division in the program goes through full_math so truncation
// direction and overflow handling live in one place.

pub mod full_math;
pub mod liquidity_amounts;
pub mod tick_math;
pub mod u256;

pub use full_math::*;
pub use u256::{U256, U512};
