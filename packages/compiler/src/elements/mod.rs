//! Elements
//!
//! One element per widget kind. An element renders its control and calls into
//! the binding resolver, the controller, the condition engine and the link
//! resolver for everything that crosses widget boundaries.

mod button;
mod container;
mod data_table;
mod dialog;
mod display;
mod input;
mod registry;

use crate::conditions::{compile_effect, ConditionalProperty};
use crate::context::CompilationContext;
use crate::controller::LifecyclePhase;
use crate::error::{CompileError, InWidget, Result};
use crate::link::Dependency;
use crate::output::js::{self, CONTROLLER_VAR};
use crate::output::CodeWriter;
use crate::widget::{NodeIndex, ValueExpression, WidgetNode};

pub use button::Button;
pub use container::Container;
pub use data_table::{DataColumn, DataTable};
pub use dialog::Dialog;
pub use display::Display;
pub use input::Input;
pub use registry::{ElementConstructor, ElementRegistry};

pub trait Element {
    fn node(&self) -> NodeIndex;

    /// Renders the control and registers everything it needs with the
    /// controller of the current view.
    fn compile(&self, ctx: &mut CompilationContext) -> Result<String>;

    /// Control property holding the widget's value.
    fn value_property(&self) -> &'static str {
        "value"
    }

    /// Event the control fires when its value changes.
    fn change_event(&self) -> Option<&'static str> {
        Some("change")
    }

    /// What a reader of the value subscribes to, `None` if the value never
    /// changes after rendering.
    fn change_dependency(&self, ctx: &mut CompilationContext) -> Result<Option<Dependency>> {
        let node = ctx.tree.node(self.node());
        match self.change_event() {
            Some(event) => Ok(Some(Dependency::event(&node.id, event))),
            None => Err(CompileError::configuration(
                node,
                "fires no change event, its value cannot be followed",
            )),
        }
    }

    /// Expression reading the widget's current value (or one column of it).
    fn build_js_value_getter(&self, ctx: &mut CompilationContext, column: Option<&str>) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.node());
        if let Some(column) = column {
            return Err(single_value_error(node, column));
        }
        let decision = ctx.resolve_binding(self.node(), self.value_property());
        if decision.is_absolute() {
            return Ok(js::model_read(&decision.path));
        }
        Ok(format!(
            "{}.get{}()",
            js::control_by_id(&node.id),
            js::upper_first(self.value_property())
        ))
    }

    /// Expression writing `value_js` into the widget, `None` if it has no value.
    fn build_js_value_setter(
        &self,
        ctx: &mut CompilationContext,
        column: Option<&str>,
        value_js: &str,
    ) -> Result<Option<String>> {
        let tree = ctx.tree;
        let node = tree.node(self.node());
        if let Some(column) = column {
            return Err(single_value_error(node, column));
        }
        let decision = ctx.resolve_binding(self.node(), self.value_property());
        if decision.is_absolute() {
            return Ok(Some(js::model_write(&decision.path, value_js)));
        }
        Ok(Some(format!(
            "{}.set{}({})",
            js::control_by_id(&node.id),
            js::upper_first(self.value_property()),
            value_js
        )))
    }

    /// Data key of a column of a data widget, `None` if the widget has no such column.
    fn resolve_column(&self, _ctx: &CompilationContext, _column: &str) -> Option<String> {
        None
    }

    fn build_js_set_disabled(&self, ctx: &CompilationContext, disabled: bool) -> String {
        control_call(ctx, self.node(), "setEnabled", !disabled)
    }

    fn build_js_set_visible(&self, ctx: &CompilationContext, visible: bool) -> String {
        control_call(ctx, self.node(), "setVisible", visible)
    }

    fn build_js_set_required(&self, ctx: &CompilationContext, required: bool) -> String {
        control_call(ctx, self.node(), "setRequired", required)
    }
}

fn control_call(ctx: &CompilationContext, index: NodeIndex, method: &str, flag: bool) -> String {
    format!(
        "{}.{}({});",
        js::control_by_id(&ctx.tree.node(index).id),
        method,
        flag
    )
}

fn single_value_error(node: &WidgetNode, column: &str) -> CompileError {
    CompileError::configuration(
        node,
        format!("has no column \"{}\", it holds a single value", column),
    )
}

pub(crate) fn no_value_error(node: &WidgetNode) -> CompileError {
    CompileError::configuration(node, "holds no value that could be linked to")
}

/// `new <namespace>.<Class>('<id>', {...})`. Cell templates are built without
/// an id since the runtime clones them per row.
#[derive(Debug, Clone)]
pub struct ControlBuilder {
    class: String,
    id: Option<String>,
    settings: Vec<(String, String)>,
}

impl ControlBuilder {
    pub fn new(ctx: &CompilationContext, class: &str, id: Option<&str>) -> Self {
        ControlBuilder {
            class: format!("{}.{}", ctx.config.control_namespace, class),
            id: id.map(str::to_string),
            settings: Vec::new(),
        }
    }

    /// Builder for the control of `node`, with the flags every control shares.
    pub fn for_node(ctx: &CompilationContext, class: &str, node: &WidgetNode) -> Self {
        ControlBuilder::new(ctx, class, Some(&node.id))
            .setting_if(node.hidden, "visible", "false")
            .setting_if(node.disabled, "enabled", "false")
    }

    pub fn setting(mut self, key: &str, value_js: impl Into<String>) -> Self {
        self.settings.push((key.to_string(), value_js.into()));
        self
    }

    pub fn setting_if(self, condition: bool, key: &str, value_js: impl Into<String>) -> Self {
        if condition {
            self.setting(key, value_js)
        } else {
            self
        }
    }

    pub fn optional_setting(self, key: &str, value_js: Option<String>) -> Self {
        match value_js {
            Some(value) => self.setting(key, value),
            None => self,
        }
    }

    pub fn render(&self) -> String {
        let id = self.id.as_deref().map(|id| format!("{}, ", js::quote(id)));
        let mut w = CodeWriter::new();
        if self.settings.is_empty() {
            w.println(&format!("new {}({}{{}})", self.class, id.unwrap_or_default()));
            return w.to_source();
        }
        w.println(&format!("new {}({}{{", self.class, id.unwrap_or_default()));
        w.inc_indent();
        let last = self.settings.len() - 1;
        for (i, (key, value)) in self.settings.iter().enumerate() {
            let separator = if i == last { "" } else { "," };
            w.print_block(&format!("{}: {}{}", js::object_key(key), value, separator));
        }
        w.dec_indent();
        w.println("})");
        w.to_source()
    }
}

/// Multi-line array literal of already rendered items.
pub fn array_literal(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let mut w = CodeWriter::new();
    w.println("[");
    w.inc_indent();
    let last = items.len() - 1;
    for (i, item) in items.iter().enumerate() {
        let separator = if i == last { "" } else { "," };
        w.print_block(&format!("{}{}", item, separator));
    }
    w.dec_indent();
    w.println("]");
    w.to_source()
}

/// Compiles `disabled_if`, `hidden_if` and `required_if`. The false branch
/// restores the statically declared state.
pub fn compile_conditional_properties(ctx: &mut CompilationContext, element: &dyn Element) -> Result<()> {
    let tree = ctx.tree;
    let node = tree.node(element.node());
    for (property, group) in &node.conditional_properties {
        let (apply_true, apply_false) = match property {
            ConditionalProperty::DisabledIf => (
                element.build_js_set_disabled(ctx, true),
                element.build_js_set_disabled(ctx, node.disabled),
            ),
            ConditionalProperty::HiddenIf => (
                element.build_js_set_visible(ctx, false),
                element.build_js_set_visible(ctx, !node.hidden),
            ),
            ConditionalProperty::RequiredIf => (
                element.build_js_set_required(ctx, true),
                element.build_js_set_required(ctx, node.required),
            ),
        };
        compile_effect(ctx, node.index, *property, group, &apply_true, &apply_false)?;
    }
    Ok(())
}

/// Initial value of the control's value property when it is not bound.
pub fn static_value(node: &WidgetNode) -> Option<String> {
    match &node.value {
        Some(ValueExpression::Literal(literal)) if !literal.is_empty() => Some(literal.to_js()),
        Some(ValueExpression::ModelPath(path)) => Some(format!("{{path: {}}}", js::quote(path))),
        _ => None,
    }
}

/// Keeps a widget whose value links to another widget in sync with its target:
/// a `syncValue<Id>` method writes the target's value into the widget, runs once
/// on init and again whenever the target changes.
pub fn compile_value_link(ctx: &mut CompilationContext, element: &dyn Element) -> Result<()> {
    let tree = ctx.tree;
    let node = tree.node(element.node());
    let Some(ValueExpression::Link(link)) = &node.value else {
        return Ok(());
    };
    let resolved = ctx.resolve_link(link, node.index)?;
    let Some(setter) = element.build_js_value_setter(ctx, None, resolved.getter())? else {
        return Ok(());
    };
    let method = js::member_name("syncValue", &node.id);
    ctx.controller()
        .add_method(&method, "", &format!("{};", setter))
        .in_widget(node)?;
    if let Some(dependency) = &resolved.dependency {
        ctx.subscribe(node.index, dependency, &method)?;
    }
    let call = format!("{}.{}();", CONTROLLER_VAR, method);
    let controller = ctx.controller();
    controller.add_lifecycle_script(LifecyclePhase::OnInit, &call, false);
    controller.add_lifecycle_script(LifecyclePhase::OnPrefillDataChanged, &call, false);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_array_literal_items_indented() {
        let source = array_literal(&["a".to_string(), "new ui.X({\n    b: 1\n})".to_string()]);
        assert_eq!(source, "[\n    a,\n    new ui.X({\n        b: 1\n    })\n]");
        assert_eq!(array_literal(&[]), "[]");
    }
}
