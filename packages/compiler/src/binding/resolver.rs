//! Binding Resolver
//!
//! Decides whether a widget's value is static or a live model binding. Rules are
//! applied in order, first match wins:
//!
//! 1. explicit per-element override
//! 2. value written as a model path (`=/a/b`): bound to that path
//! 3. no data column: static
//! 4. binding pre-registered in the model: bound to that path
//! 5. binding disabled for the element instance: static
//! 6. non-empty literal value: static
//! 7. path already owned by another widget: static (configurable)
//! 8. bound to `prefix + column`
//!
//! Decisions are cached per (node, property, prefix), so resolving twice yields
//! the same result. Only absolute paths take part in conflict detection: cell
//! templates resolve relative to their row and never own a fixed path.

use std::collections::HashMap;

use log::{debug, warn};

use crate::binding::{join_path, BindingDecision};
use crate::config::BindingConflictPolicy;
use crate::model::ModelBindings;
use crate::widget::{NodeIndex, ValueExpression, WidgetTree};

/// Per-element-instance switches. Kept outside the node so template reuse does
/// not corrupt the shared tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingOverrides {
    /// `Some(true)` forces a binding, `Some(false)` forbids one. Honored verbatim.
    pub force_bound: Option<bool>,
    /// Opt out of the default binding; yields to bindings registered in the model.
    pub binding_disabled: bool,
}

#[derive(Debug, Default)]
pub struct BindingResolver {
    policy: BindingConflictPolicy,
    owners: HashMap<String, NodeIndex>,
    cache: HashMap<(NodeIndex, String, String), BindingDecision>,
}

impl BindingResolver {
    pub fn new(policy: BindingConflictPolicy) -> Self {
        BindingResolver {
            policy,
            owners: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn resolve(
        &mut self,
        tree: &WidgetTree,
        model: &dyn ModelBindings,
        node: NodeIndex,
        property: &str,
        overrides: &BindingOverrides,
        prefix: &str,
    ) -> BindingDecision {
        let key = (node, property.to_string(), prefix.to_string());
        if let Some(decision) = self.cache.get(&key) {
            return decision.clone();
        }
        let decision = self.decide(tree, model, node, property, overrides, prefix);
        debug!(
            "binding of {} \"{}\".{}: {}",
            tree.node(node).kind,
            tree.node(node).id,
            property,
            if decision.is_bound { decision.path.as_str() } else { "<static>" }
        );
        self.cache.insert(key, decision.clone());
        decision
    }

    /// Drops the cached decisions of `node` and releases the paths it owns.
    pub fn invalidate(&mut self, node: NodeIndex) {
        self.cache.retain(|(n, _, _), _| *n != node);
        self.owners.retain(|_, owner| *owner != node);
    }

    /// Widget owning the given absolute path, if any.
    pub fn owner_of(&self, path: &str) -> Option<NodeIndex> {
        self.owners.get(path).copied()
    }

    fn decide(
        &mut self,
        tree: &WidgetTree,
        model: &dyn ModelBindings,
        index: NodeIndex,
        property: &str,
        overrides: &BindingOverrides,
        prefix: &str,
    ) -> BindingDecision {
        let node = tree.node(index);
        let data_type = node.data_type;

        if let Some(force) = overrides.force_bound {
            if !force {
                return BindingDecision::unbound(prefix, data_type);
            }
            let path = model.binding_path(node, property).unwrap_or_else(|| {
                join_path(prefix, node.column_name.as_deref().unwrap_or(&node.id))
            });
            self.claim(&path, index);
            return BindingDecision::bound(path, prefix, data_type);
        }

        if let Some(ValueExpression::ModelPath(path)) = &node.value {
            self.claim(path, index);
            return BindingDecision::bound(path.clone(), prefix, data_type);
        }

        let Some(column) = node.column_name.as_deref() else {
            return BindingDecision::unbound(prefix, data_type);
        };

        if let Some(path) = model.binding_path(node, property) {
            self.claim(&path, index);
            return BindingDecision::bound(path, prefix, data_type);
        }

        if overrides.binding_disabled {
            return BindingDecision::unbound(prefix, data_type);
        }

        if let Some(ValueExpression::Literal(literal)) = &node.value {
            if !literal.is_empty() {
                return BindingDecision::unbound(prefix, data_type);
            }
        }

        let path = join_path(prefix, column);
        if path.starts_with('/') {
            if let Some(owner) = self.owners.get(&path).copied() {
                if owner != index && self.policy == BindingConflictPolicy::FallbackToStatic {
                    warn!(
                        "{} \"{}\" falls back to a static value: path {} is already bound to \"{}\"",
                        node.kind,
                        node.id,
                        path,
                        tree.node(owner).id
                    );
                    return BindingDecision::unbound(prefix, data_type);
                }
            }
            self.claim(&path, index);
        }
        BindingDecision::bound(path, prefix, data_type)
    }

    fn claim(&mut self, path: &str, index: NodeIndex) {
        if path.starts_with('/') {
            self.owners.entry(path.to_string()).or_insert(index);
        }
    }
}
