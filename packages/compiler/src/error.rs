//! Compilation Errors
//!
//! Every fatal error carries the id and kind of the widget that triggered it, so
//! template authors can locate the offending node in the declarative tree.

use thiserror::Error;

use crate::conditions::ConditionError;
use crate::controller::ControllerError;
use crate::link::BrokenLinkError;
use crate::widget::{WidgetKind, WidgetNode};

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The declarative tree violates a contract of the widget it describes.
    #[error("{kind} \"{widget_id}\": {message}")]
    Configuration {
        widget_id: String,
        kind: WidgetKind,
        message: String,
    },

    #[error(transparent)]
    BrokenLink(#[from] BrokenLinkError),

    #[error("{kind} \"{widget_id}\": {source}")]
    Controller {
        widget_id: String,
        kind: WidgetKind,
        #[source]
        source: ControllerError,
    },

    #[error("{kind} \"{widget_id}\": {source}")]
    Condition {
        widget_id: String,
        kind: WidgetKind,
        #[source]
        source: ConditionError,
    },

    /// The widget tree itself could not be built (duplicate ids, bad nesting).
    #[error("invalid widget tree: {0}")]
    InvalidTree(String),

    #[error("malformed widget description: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    pub fn configuration(node: &WidgetNode, message: impl Into<String>) -> Self {
        CompileError::Configuration {
            widget_id: node.id.clone(),
            kind: node.kind,
            message: message.into(),
        }
    }

    /// Id of the widget the error refers to, if any.
    pub fn widget_id(&self) -> Option<&str> {
        match self {
            CompileError::Configuration { widget_id, .. }
            | CompileError::Controller { widget_id, .. }
            | CompileError::Condition { widget_id, .. } => Some(widget_id),
            CompileError::BrokenLink(err) => Some(&err.origin_id),
            CompileError::InvalidTree(_) | CompileError::Json(_) => None,
        }
    }
}

/// Attaches the widget context to errors raised by subsystems that do not know
/// which widget they are working for.
pub trait InWidget<T> {
    fn in_widget(self, node: &WidgetNode) -> Result<T>;
}

impl<T> InWidget<T> for std::result::Result<T, ControllerError> {
    fn in_widget(self, node: &WidgetNode) -> Result<T> {
        self.map_err(|source| CompileError::Controller {
            widget_id: node.id.clone(),
            kind: node.kind,
            source,
        })
    }
}

impl<T> InWidget<T> for std::result::Result<T, ConditionError> {
    fn in_widget(self, node: &WidgetNode) -> Result<T> {
        self.map_err(|source| CompileError::Condition {
            widget_id: node.id.clone(),
            kind: node.kind,
            source,
        })
    }
}
