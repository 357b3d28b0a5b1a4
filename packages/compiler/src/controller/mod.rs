//! Controllers
//!
//! One controller per independently initializable view.

#[allow(clippy::module_inception)]
mod controller;
mod lifecycle;

use thiserror::Error;

pub use controller::{Controller, ControllerMethod, CANCELLED_GUARD};
pub use lifecycle::LifecyclePhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("controller method \"{name}\" is already registered with a different body")]
    DuplicateMethod { name: String },
    #[error("dependent object \"{name}\" is already declared with a different initializer")]
    DuplicateProperty { name: String },
    #[error("controller method \"{name}\" is referenced before it was declared")]
    UndeclaredMethod { name: String },
    #[error("dependent object \"{name}\" is referenced before it was declared")]
    UndeclaredProperty { name: String },
    #[error("event \"{event}\" of \"{element_id}\" is already attached")]
    DuplicateDispatch { element_id: String, event: String },
    #[error("handler \"{name}\" for \"{element_id}\".{event} collides with another controller member")]
    HandlerNameCollision {
        name: String,
        element_id: String,
        event: String,
    },
}
