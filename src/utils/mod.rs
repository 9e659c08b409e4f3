//! Utility Functions
//!
//! Shared utility functions used throughout the program: PDA derivation,
//! account validation, rent/serialization helpers, the reentrancy guard,
//! math helpers, and permit signature verification.

pub mod ed25519;
pub mod fixed_point;
pub mod math;
pub mod pda;
pub mod reentrancy;
pub mod rent;
pub mod serialization;
pub mod token_validation;
pub mod validation;

pub use ed25519::*;
pub use fixed_point::*;
pub use math::*;
pub use pda::*;
pub use reentrancy::*;
pub use rent::*;
pub use serialization::*;
pub use token_validation::*;
pub use validation::*;
