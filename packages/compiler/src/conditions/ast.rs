//! Condition Trees
//!
//! Declarative boolean rules attached to widget properties, as declared
//! (`ConditionGroupDescription`) and as validated for compilation
//! (`ConditionGroup`).

use serde::Deserialize;
use serde_json::Value;

use crate::conditions::ConditionError;
use crate::link::WidgetLink;
use crate::widget::LiteralValue;

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionGroupDescription {
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default)]
    pub conditions: Vec<ConditionDescription>,
    #[serde(default, alias = "nested_groups")]
    pub condition_groups: Vec<ConditionGroupDescription>,
}

fn default_operator() -> String {
    "AND".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionDescription {
    pub value_left: Value,
    pub comparator: String,
    #[serde(default)]
    pub value_right: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        match text.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicalOperator::And),
            "OR" => Ok(LogicalOperator::Or),
            _ => Err(ConditionError::UnknownOperator(text.to_string())),
        }
    }

    pub fn js_operator(&self) -> &'static str {
        match self {
            LogicalOperator::And => " && ",
            LogicalOperator::Or => " || ",
        }
    }

    /// Value of an empty group.
    pub fn identity(&self) -> &'static str {
        match self {
            LogicalOperator::And => "true",
            LogicalOperator::Or => "false",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `==`
    Equals,
    /// `!==`
    NotEquals,
    /// `=`: case-insensitive "contains"
    Is,
    /// `!=`
    IsNot,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    /// `[`: contained in a comma separated list
    In,
    /// `![`
    NotIn,
}

impl Comparator {
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        Ok(match text.trim() {
            "==" => Comparator::Equals,
            "!==" => Comparator::NotEquals,
            "=" => Comparator::Is,
            "!=" => Comparator::IsNot,
            "<" => Comparator::Less,
            "<=" => Comparator::LessOrEqual,
            ">" => Comparator::Greater,
            ">=" => Comparator::GreaterOrEqual,
            "[" => Comparator::In,
            "![" => Comparator::NotIn,
            _ => return Err(ConditionError::UnknownComparator(text.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralValue),
    ModelPath(String),
    WidgetReference(WidgetLink),
}

impl Expression {
    pub fn from_json(value: &Value) -> Result<Self, ConditionError> {
        Ok(match value {
            Value::Null => Expression::Literal(LiteralValue::Null),
            Value::Bool(b) => Expression::Literal(LiteralValue::Bool(*b)),
            Value::Number(n) => Expression::Literal(LiteralValue::Number(n.clone())),
            Value::String(s) => match s.strip_prefix('=') {
                Some(path) if path.starts_with('/') => Expression::ModelPath(path.to_string()),
                Some(_) => match WidgetLink::parse(s) {
                    Some(link) => Expression::WidgetReference(link),
                    None => return Err(ConditionError::InvalidExpression(s.clone())),
                },
                None => Expression::Literal(LiteralValue::String(s.clone())),
            },
            other => return Err(ConditionError::InvalidExpression(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Expression,
    pub comparator: Comparator,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub operator: LogicalOperator,
    pub conditions: Vec<Condition>,
    pub nested_groups: Vec<ConditionGroup>,
}

impl ConditionGroup {
    pub fn new(operator: LogicalOperator) -> Self {
        ConditionGroup {
            operator,
            conditions: Vec::new(),
            nested_groups: Vec::new(),
        }
    }

    pub fn with_condition(mut self, left: Expression, comparator: Comparator, right: Expression) -> Self {
        self.conditions.push(Condition {
            left,
            comparator,
            right,
        });
        self
    }

    pub fn with_group(mut self, group: ConditionGroup) -> Self {
        self.nested_groups.push(group);
        self
    }

    pub fn from_description(desc: &ConditionGroupDescription) -> Result<Self, ConditionError> {
        let operator = LogicalOperator::parse(&desc.operator)?;
        let conditions = desc
            .conditions
            .iter()
            .map(|c| {
                Ok(Condition {
                    left: Expression::from_json(&c.value_left)?,
                    comparator: Comparator::parse(&c.comparator)?,
                    right: Expression::from_json(&c.value_right)?,
                })
            })
            .collect::<Result<Vec<_>, ConditionError>>()?;
        let nested_groups = desc
            .condition_groups
            .iter()
            .map(ConditionGroup::from_description)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConditionGroup {
            operator,
            conditions,
            nested_groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn description(value: Value) -> ConditionGroupDescription {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_build_nested_groups() {
        let desc = description(json!({
            "operator": "or",
            "conditions": [{"value_left": "=inpA", "comparator": "==", "value_right": 1}],
            "condition_groups": [{
                "conditions": [{"value_left": "=/status", "comparator": "[", "value_right": "A,B"}]
            }]
        }));
        let group = ConditionGroup::from_description(&desc).unwrap();
        assert_eq!(group.operator, LogicalOperator::Or);
        assert_eq!(group.nested_groups[0].operator, LogicalOperator::And);
        assert_eq!(
            group.nested_groups[0].conditions[0].left,
            Expression::ModelPath("/status".into())
        );
    }

    #[test]
    fn should_reject_unknown_operator() {
        let desc = description(json!({"operator": "XOR", "conditions": []}));
        assert_eq!(
            ConditionGroup::from_description(&desc).unwrap_err(),
            ConditionError::UnknownOperator("XOR".into())
        );
    }

    #[test]
    fn should_reject_unknown_comparator() {
        let desc = description(json!({
            "conditions": [{"value_left": "a", "comparator": "~~", "value_right": "b"}]
        }));
        assert_eq!(
            ConditionGroup::from_description(&desc).unwrap_err(),
            ConditionError::UnknownComparator("~~".into())
        );
    }
}
