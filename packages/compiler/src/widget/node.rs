//! Widget Nodes

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

use crate::conditions::{ConditionGroup, ConditionalProperty};
use crate::widget::{ValueExpression, WidgetKind};

/// Stable index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        NodeIndex(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Date,
    DateTime,
}

/// One element of the declarative tree. Read-only while compiling.
#[derive(Debug, Clone)]
pub struct WidgetNode {
    pub index: NodeIndex,
    pub id: String,
    pub kind: WidgetKind,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub caption: Option<String>,
    /// Data column the widget's value is bound to.
    pub column_name: Option<String>,
    pub data_type: DataType,
    pub value: Option<ValueExpression>,
    pub hidden: bool,
    pub disabled: bool,
    pub required: bool,
    pub conditional_properties: IndexMap<ConditionalProperty, ConditionGroup>,
    /// Server action triggered by buttons or used to load data widgets.
    pub action: Option<String>,
    pub open_dialog: Option<String>,
    pub close_dialog: bool,
    pub page_size: Option<u32>,
    pub prefill_action: Option<String>,
    /// Declared properties the core does not interpret.
    pub properties: IndexMap<String, serde_json::Value>,
}

impl WidgetNode {
    pub fn caption_or_id(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.id)
    }
}
