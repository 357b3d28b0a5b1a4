//! Value Binding
//!
//! Static-vs-bound decisions and model paths of widget values.

mod decision;
mod resolver;

pub use decision::{join_path, BindingDecision, BindingFormat};
pub use resolver::{BindingOverrides, BindingResolver};
