#![deny(clippy::all)]

/**
 * Widget Compiler
 *
 * Compiles declarative widget trees into controller and view code for an
 * event-driven UI runtime with a path-addressed data model.
 */

pub mod binding;
pub mod compiler;
pub mod conditions;
mod config;
pub mod context;
pub mod controller;
pub mod elements;
mod error;
pub mod link;
pub mod model;
pub mod output;
pub mod prefill;
pub mod server;
pub mod translation;
pub mod widget;

pub use compiler::{CompilationOutput, CompiledView, WidgetCompiler};
pub use config::{BindingConflictPolicy, CompilerConfig};
pub use context::CompilationContext;
pub use error::{CompileError, InWidget, Result};
pub use link::{BrokenLinkError, BrokenLinkReason};
pub use model::{BindingRegistration, ModelBindings, PrefillModel};
pub use widget::{PageDescription, WidgetDescription, WidgetKind, WidgetTree};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
