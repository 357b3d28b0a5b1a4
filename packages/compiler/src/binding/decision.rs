//! Binding Decisions

use crate::output::js;
use crate::widget::DataType;

/// How a bound value is formatted by the runtime's model types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingFormat {
    pub type_name: &'static str,
    pub source_pattern: Option<&'static str>,
}

impl BindingFormat {
    pub fn for_data_type(data_type: DataType) -> Self {
        let (type_name, source_pattern) = match data_type {
            DataType::String => ("String", None),
            DataType::Number => ("Float", None),
            DataType::Integer => ("Integer", None),
            DataType::Boolean => ("Boolean", None),
            DataType::Date => ("Date", Some("yyyy-MM-dd")),
            DataType::DateTime => ("DateTime", Some("yyyy-MM-dd HH:mm:ss")),
        };
        BindingFormat {
            type_name,
            source_pattern,
        }
    }
}

/// Outcome of binding resolution for one (element, value property, prefix).
///
/// An unbound decision always has an empty `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDecision {
    pub is_bound: bool,
    pub path: String,
    pub prefix: String,
    pub format: BindingFormat,
}

impl BindingDecision {
    pub fn bound(path: String, prefix: &str, data_type: DataType) -> Self {
        BindingDecision {
            is_bound: true,
            path,
            prefix: prefix.to_string(),
            format: BindingFormat::for_data_type(data_type),
        }
    }

    pub fn unbound(prefix: &str, data_type: DataType) -> Self {
        BindingDecision {
            is_bound: false,
            path: String::new(),
            prefix: prefix.to_string(),
            format: BindingFormat::for_data_type(data_type),
        }
    }

    /// Bound to a fixed location of the model rather than relative to a row.
    pub fn is_absolute(&self) -> bool {
        self.is_bound && self.path.starts_with('/')
    }

    /// `{path: ..., type: ...}` for the control's value property.
    pub fn binding_expression(&self) -> Option<String> {
        if !self.is_bound {
            return None;
        }
        let mut expr = format!(
            "{{path: {}, type: {}",
            js::quote(&self.path),
            js::quote(self.format.type_name)
        );
        if let Some(pattern) = self.format.source_pattern {
            expr.push_str(&format!(
                ", formatOptions: {{source: {{pattern: {}}}}}",
                js::quote(pattern)
            ));
        }
        expr.push('}');
        Some(expr)
    }
}

/// `prefix + column`, inserting a separator only where one is missing.
pub fn join_path(prefix: &str, column: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{}{}", prefix, column)
    } else {
        format!("{}/{}", prefix, column)
    }
}
