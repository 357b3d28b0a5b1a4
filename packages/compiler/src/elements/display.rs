//! Read-only text display.

use crate::context::CompilationContext;
use crate::elements::{
    compile_conditional_properties, compile_value_link, static_value, ControlBuilder, Element,
};
use crate::error::Result;
use crate::link::Dependency;
use crate::widget::{NodeIndex, ValueExpression};

pub struct Display {
    index: NodeIndex,
}

impl Display {
    pub fn new(index: NodeIndex) -> Self {
        Display { index }
    }
}

impl Element for Display {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        let decision = ctx.resolve_binding(self.index, self.value_property());
        let text = decision
            .binding_expression()
            .or_else(|| static_value(node));

        compile_value_link(ctx, self)?;
        compile_conditional_properties(ctx, self)?;

        Ok(ControlBuilder::for_node(ctx, "Text", node)
            .optional_setting("text", text)
            .render())
    }

    fn value_property(&self) -> &'static str {
        "text"
    }

    fn change_event(&self) -> Option<&'static str> {
        None
    }

    /// A display only changes through its own value link, so readers follow
    /// whatever that link follows.
    fn change_dependency(&self, ctx: &mut CompilationContext) -> Result<Option<Dependency>> {
        let tree = ctx.tree;
        match &tree.node(self.index).value {
            Some(ValueExpression::Link(link)) => Ok(ctx.follow_value_link(self.index, link)?.dependency),
            _ => Ok(None),
        }
    }

    fn build_js_set_disabled(&self, _ctx: &CompilationContext, _disabled: bool) -> String {
        String::new()
    }

    fn build_js_set_required(&self, _ctx: &CompilationContext, _required: bool) -> String {
        String::new()
    }
}
