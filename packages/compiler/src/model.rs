//! Application Model
//!
//! Read-only view of the bindings that earlier pipeline steps (e.g. prefill)
//! registered for widgets. The compiler never writes to this registry.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::widget::WidgetNode;

pub trait ModelBindings {
    fn binding_path(&self, node: &WidgetNode, property: &str) -> Option<String>;

    fn has_binding(&self, node: &WidgetNode, property: &str) -> bool {
        self.binding_path(node, property).is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindingRegistration {
    pub widget_id: String,
    #[serde(default = "default_property")]
    pub property: String,
    pub path: String,
}

fn default_property() -> String {
    "value".to_string()
}

/// Bindings keyed by `(widget id, property)`.
#[derive(Debug, Clone, Default)]
pub struct PrefillModel {
    registrations: IndexMap<(String, String), String>,
}

impl PrefillModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registrations<'r>(
        registrations: impl IntoIterator<Item = &'r BindingRegistration>,
    ) -> Self {
        let mut model = Self::new();
        for r in registrations {
            model.register(&r.widget_id, &r.property, &r.path);
        }
        model
    }

    pub fn register(&mut self, widget_id: &str, property: &str, path: &str) {
        self.registrations.insert(
            (widget_id.to_string(), property.to_string()),
            path.to_string(),
        );
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl ModelBindings for PrefillModel {
    fn binding_path(&self, node: &WidgetNode, property: &str) -> Option<String> {
        self.registrations
            .get(&(node.id.clone(), property.to_string()))
            .cloned()
    }
}
