//! Inputs
//!
//! Text inputs, hidden inputs and check boxes. All of them are editable value
//! holders: their value is either bound to the model or set statically, and
//! every change is dispatched through the controller so other widgets can react.

use crate::context::CompilationContext;
use crate::elements::{
    compile_conditional_properties, compile_value_link, static_value, ControlBuilder, Element,
};
use crate::error::{InWidget, Result};
use crate::output::js;
use crate::widget::{NodeIndex, WidgetKind};

pub struct Input {
    kind: WidgetKind,
    index: NodeIndex,
}

impl Input {
    pub fn new(kind: WidgetKind, index: NodeIndex) -> Self {
        Input { kind, index }
    }

    fn control_class(&self) -> &'static str {
        match self.kind {
            WidgetKind::InputCheckBox => "CheckBox",
            WidgetKind::InputHidden => "InputHidden",
            _ => "Input",
        }
    }
}

impl Element for Input {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        let property = self.value_property();
        let decision = ctx.resolve_binding(self.index, property);
        let value = decision
            .binding_expression()
            .or_else(|| static_value(node));

        compile_value_link(ctx, self)?;
        compile_conditional_properties(ctx, self)?;

        let mut control = ControlBuilder::for_node(ctx, self.control_class(), node)
            .optional_setting(property, value)
            .setting_if(node.required, "required", "true");
        if self.kind == WidgetKind::InputHidden {
            control = control.setting_if(!node.hidden, "visible", "false");
        }
        if let Some(event) = self.change_event() {
            let dispatch = ctx
                .controller()
                .build_event_dispatch_expression(&node.id, event)
                .in_widget(node)?;
            control = control.setting(event, dispatch);
        }
        Ok(control.render())
    }

    fn value_property(&self) -> &'static str {
        match self.kind {
            WidgetKind::InputCheckBox => "selected",
            _ => "value",
        }
    }

    fn change_event(&self) -> Option<&'static str> {
        match self.kind {
            WidgetKind::InputCheckBox => Some("select"),
            _ => Some("change"),
        }
    }

    fn build_js_set_visible(&self, ctx: &CompilationContext, visible: bool) -> String {
        if self.kind == WidgetKind::InputHidden {
            return String::new();
        }
        format!(
            "{}.setVisible({});",
            js::control_by_id(&ctx.tree.node(self.index).id),
            visible
        )
    }
}
