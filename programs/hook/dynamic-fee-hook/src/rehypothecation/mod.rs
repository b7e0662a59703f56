pub mod hook;
pub mod jit;
pub mod share_ledger;
pub mod yield_source;

pub use hook::*;
pub use jit::*;
pub use share_ledger::*;
pub use yield_source::*;
