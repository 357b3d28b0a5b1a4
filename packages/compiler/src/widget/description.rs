//! Widget Descriptions
//!
//! Serde shape of the widget tree as delivered by the surrounding application.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::conditions::ConditionGroupDescription;
use crate::model::BindingRegistration;
use crate::widget::{DataType, WidgetKind};

/// A whole page: the root widget plus bindings registered by earlier steps.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDescription {
    #[serde(default)]
    pub page: Option<String>,
    pub widget: WidgetDescription,
    #[serde(default)]
    pub bindings: Vec<BindingRegistration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrefillDescription {
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetDescription {
    pub widget_type: WidgetKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub attribute_alias: Option<String>,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled_if: Option<ConditionGroupDescription>,
    #[serde(default)]
    pub hidden_if: Option<ConditionGroupDescription>,
    #[serde(default)]
    pub required_if: Option<ConditionGroupDescription>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub open_dialog: Option<String>,
    #[serde(default)]
    pub close_dialog: bool,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub prefill: Option<PrefillDescription>,
    #[serde(default)]
    pub widgets: Vec<WidgetDescription>,
    #[serde(default)]
    pub columns: Vec<WidgetDescription>,
    #[serde(default)]
    pub buttons: Vec<WidgetDescription>,
    #[serde(flatten)]
    pub properties: IndexMap<String, serde_json::Value>,
}
