//! Types Module
//!
//! Wire types dispatched by the program entrypoint: the instruction enum
//! and the structured event payloads it causes the processors to emit.

pub mod events;
pub mod instructions;

pub use events::*;
pub use instructions::*;
