//! Output Module
//!
//! Writers and helpers for the generated runtime code

pub mod emitter;
pub mod js;

pub use emitter::CodeWriter;
