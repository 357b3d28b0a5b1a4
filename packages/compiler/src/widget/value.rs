//! Widget Values
//!
//! A declared value is either a literal, a read from the model, or a link to
//! another widget (or to the prefill context).

use serde_json::Value;

use crate::link::WidgetLink;
use crate::output::js;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl LiteralValue {
    pub fn is_empty(&self) -> bool {
        match self {
            LiteralValue::String(s) => s.is_empty(),
            LiteralValue::Null => true,
            _ => false,
        }
    }

    pub fn to_js(&self) -> String {
        match self {
            LiteralValue::String(s) => js::quote(s),
            LiteralValue::Number(n) => n.to_string(),
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpression {
    Literal(LiteralValue),
    /// `=/absolute/model/path`
    ModelPath(String),
    /// `=widgetId`, `=widgetId!column`, `=~input!column`
    Link(WidgetLink),
}

impl ValueExpression {
    /// Parses a declared value. Returns `Ok(None)` for empty values and
    /// `Err(text)` for `=` expressions that are neither paths nor links.
    pub fn parse(text: &str) -> Result<Option<ValueExpression>, String> {
        if text.is_empty() {
            return Ok(None);
        }
        let Some(rest) = text.strip_prefix('=') else {
            return Ok(Some(ValueExpression::Literal(LiteralValue::String(
                text.to_string(),
            ))));
        };
        if rest.starts_with('/') {
            return Ok(Some(ValueExpression::ModelPath(rest.to_string())));
        }
        match WidgetLink::parse(text) {
            Some(link) => Ok(Some(ValueExpression::Link(link))),
            None => Err(text.to_string()),
        }
    }

    pub fn from_json(value: &Value) -> Result<Option<ValueExpression>, String> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => ValueExpression::parse(s),
            Value::Bool(b) => Ok(Some(ValueExpression::Literal(LiteralValue::Bool(*b)))),
            Value::Number(n) => Ok(Some(ValueExpression::Literal(LiteralValue::Number(
                n.clone(),
            )))),
            other => Err(other.to_string()),
        }
    }
}
