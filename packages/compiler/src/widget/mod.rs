//! Widget Model
//!
//! The declarative widget tree consumed by the compiler.

mod description;
mod kind;
mod node;
mod tree;
mod value;

pub use description::{PageDescription, PrefillDescription, WidgetDescription};
pub use kind::WidgetKind;
pub use node::{DataType, NodeIndex, WidgetNode};
pub use tree::{WidgetTree, DEFAULT_PAGE};
pub use value::{LiteralValue, ValueExpression};
