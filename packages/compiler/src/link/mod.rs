//! Widget Links
//!
//! Cross-widget references and their resolution into model paths or
//! getter/setter calls.

mod resolver;
mod widget_link;

use thiserror::Error;

use crate::widget::WidgetKind;

pub use resolver::{resolve_link, LinkShape, ResolvedLink};
pub use widget_link::{LinkTarget, WidgetLink};

/// Something generated code can observe for changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// Change of a model location.
    ModelPath(String),
    /// Runtime event of a control.
    Event { element_id: String, event: String },
}

impl Dependency {
    pub fn event(element_id: &str, event: &str) -> Self {
        Dependency::Event {
            element_id: element_id.to_string(),
            event: event.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokenLinkReason {
    #[error("widget \"{0}\" not found")]
    TargetNotFound(String),
    #[error("target page \"{0}\" differs from the current page \"{1}\" and cross-page links are disabled")]
    ForeignPage(String, String),
}

#[derive(Debug, Clone, Error)]
#[error("broken widget link `{expression}` in {origin_kind} \"{origin_id}\": {reason}")]
pub struct BrokenLinkError {
    pub expression: String,
    pub target_id: String,
    pub origin_id: String,
    pub origin_kind: WidgetKind,
    pub reason: BrokenLinkReason,
}
