//! Processors Module
//!
//! Instruction handlers organized by the component they implement: factory
//! governance and pair creation, liquidity mint/burn, swap/skim/sync, and the
//! pool-share ledger (transfer/approve/permit).

pub mod factory;
pub mod liquidity;
pub mod lp_token;
pub mod swap;

pub use factory::*;
pub use liquidity::*;
pub use lp_token::*;
pub use swap::*;
