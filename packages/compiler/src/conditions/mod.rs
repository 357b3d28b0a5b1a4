//! Conditional Properties
//!
//! Enable/disable/visibility rules that reference other widgets or the model,
//! compiled into guard code re-evaluated on every relevant change.

mod ast;
mod effect;
mod predicate;

use thiserror::Error;

pub use ast::{
    Comparator, Condition, ConditionDescription, ConditionGroup, ConditionGroupDescription,
    Expression, LogicalOperator,
};
pub use effect::{
    compile_effect, compile_row_effect, wrap_row_iteration, Effect, RowEffect,
    ROWS_UPDATED_EVENT,
};
pub use predicate::{compile_predicate, Predicate, RowContext};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("unknown logical operator \"{0}\" (expected AND or OR)")]
    UnknownOperator(String),
    #[error("unknown comparator \"{0}\"")]
    UnknownComparator(String),
    #[error("`{0}` is neither a literal, a model path nor a widget link")]
    InvalidExpression(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalProperty {
    DisabledIf,
    HiddenIf,
    RequiredIf,
}

impl ConditionalProperty {
    pub fn name(&self) -> &'static str {
        match self {
            ConditionalProperty::DisabledIf => "disabled_if",
            ConditionalProperty::HiddenIf => "hidden_if",
            ConditionalProperty::RequiredIf => "required_if",
        }
    }

    /// Prefix of the controller method applying the property.
    pub fn member_prefix(&self) -> &'static str {
        match self {
            ConditionalProperty::DisabledIf => "applyDisabledIf",
            ConditionalProperty::HiddenIf => "applyHiddenIf",
            ConditionalProperty::RequiredIf => "applyRequiredIf",
        }
    }
}
