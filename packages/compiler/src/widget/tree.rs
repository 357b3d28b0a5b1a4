//! Widget Tree
//!
//! Arena holding every node of one page. All cross references (parent, links,
//! dialogs opened by buttons) are resolved through node indices and the id index,
//! so forward references work regardless of compile order.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::conditions::{ConditionGroup, ConditionalProperty};
use crate::error::{CompileError, Result};
use crate::widget::{
    NodeIndex, PageDescription, ValueExpression, WidgetDescription, WidgetKind, WidgetNode,
};

pub const DEFAULT_PAGE: &str = "default";

#[derive(Debug, Clone)]
pub struct WidgetTree {
    page: String,
    nodes: Vec<WidgetNode>,
    by_id: HashMap<String, NodeIndex>,
}

impl WidgetTree {
    pub fn from_description(page: Option<&str>, root: &WidgetDescription) -> Result<Self> {
        let mut tree = WidgetTree {
            page: page.unwrap_or(DEFAULT_PAGE).to_string(),
            nodes: Vec::new(),
            by_id: HashMap::new(),
        };
        tree.add(root, None, 0)?;
        Ok(tree)
    }

    pub fn from_page(page: &PageDescription) -> Result<Self> {
        Self::from_description(page.page.as_deref(), &page.widget)
    }

    /// Accepts either a page description (`{"page": ..., "widget": {...}}`) or a
    /// bare root widget.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        if value.get("widget").is_some() {
            let page: PageDescription = serde_json::from_value(value)?;
            Self::from_page(&page)
        } else {
            let root: WidgetDescription = serde_json::from_value(value)?;
            Self::from_description(None, &root)
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> &WidgetNode {
        &self.nodes[index.as_usize()]
    }

    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetNode> {
        self.nodes.iter()
    }

    /// Parent, grandparent, ... up to the root. Does not include `index` itself.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.node(index).parent, move |i| self.node(*i).parent)
    }

    pub fn closest(&self, index: NodeIndex, kind: WidgetKind) -> Option<NodeIndex> {
        std::iter::once(index)
            .chain(self.ancestors(index))
            .find(|i| self.node(*i).kind == kind)
    }

    /// Root of the view the node is rendered in: the closest dialog or the page root.
    pub fn view_root(&self, index: NodeIndex) -> NodeIndex {
        std::iter::once(index)
            .chain(self.ancestors(index))
            .find(|i| self.node(*i).kind.is_view_root())
            .unwrap_or_else(|| self.root())
    }

    fn add(
        &mut self,
        desc: &WidgetDescription,
        parent: Option<NodeIndex>,
        position: usize,
    ) -> Result<NodeIndex> {
        let kind = desc.widget_type;
        let id = match (&desc.id, parent) {
            (Some(id), _) => id.clone(),
            (None, Some(p)) => format!("{}_{}{}", self.node(p).id, kind.id_prefix(), position),
            (None, None) => format!("{}{}", kind.id_prefix(), position),
        };
        if id.is_empty() {
            return Err(CompileError::InvalidTree(format!("{} with empty id", kind)));
        }
        if self.by_id.contains_key(&id) {
            return Err(CompileError::InvalidTree(format!(
                "duplicate widget id \"{}\"",
                id
            )));
        }
        check_nesting(kind, parent.map(|p| self.node(p)), &id)?;

        let value = match &desc.value {
            Some(raw) => ValueExpression::from_json(raw).map_err(|text| {
                CompileError::Configuration {
                    widget_id: id.clone(),
                    kind,
                    message: format!("unsupported value expression `{}`", text),
                }
            })?,
            None => None,
        };

        let mut conditional_properties = IndexMap::new();
        let declared = [
            (ConditionalProperty::DisabledIf, &desc.disabled_if),
            (ConditionalProperty::HiddenIf, &desc.hidden_if),
            (ConditionalProperty::RequiredIf, &desc.required_if),
        ];
        for (property, group) in declared {
            if let Some(group) = group {
                let group = ConditionGroup::from_description(group).map_err(|source| {
                    CompileError::Condition {
                        widget_id: id.clone(),
                        kind,
                        source,
                    }
                })?;
                conditional_properties.insert(property, group);
            }
        }

        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(WidgetNode {
            index,
            id: id.clone(),
            kind,
            parent,
            children: Vec::new(),
            caption: desc.caption.clone(),
            column_name: desc.attribute_alias.clone(),
            data_type: desc.data_type,
            value,
            hidden: desc.hidden,
            disabled: desc.disabled,
            required: desc.required,
            conditional_properties,
            action: desc.action.clone(),
            open_dialog: desc.open_dialog.clone(),
            close_dialog: desc.close_dialog,
            page_size: desc.page_size,
            prefill_action: desc.prefill.as_ref().map(|p| p.action.clone()),
            properties: desc.properties.clone(),
        });
        self.by_id.insert(id, index);

        let children = desc
            .widgets
            .iter()
            .chain(desc.columns.iter())
            .chain(desc.buttons.iter());
        for (pos, child) in children.enumerate() {
            let child_index = self.add(child, Some(index), pos)?;
            self.nodes[index.as_usize()].children.push(child_index);
        }

        Ok(index)
    }
}

fn check_nesting(kind: WidgetKind, parent: Option<&WidgetNode>, id: &str) -> Result<()> {
    let Some(parent) = parent else {
        return match kind {
            WidgetKind::DataColumn => Err(CompileError::InvalidTree(format!(
                "DataColumn \"{}\" cannot be the root widget",
                id
            ))),
            _ => Ok(()),
        };
    };
    let allowed = match parent.kind {
        WidgetKind::Panel | WidgetKind::Form | WidgetKind::Dialog => {
            kind != WidgetKind::DataColumn
        }
        WidgetKind::DataTable => matches!(kind, WidgetKind::DataColumn | WidgetKind::Button),
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(CompileError::InvalidTree(format!(
            "{} \"{}\" cannot be placed inside {} \"{}\"",
            kind, id, parent.kind, parent.id
        )))
    }
}
