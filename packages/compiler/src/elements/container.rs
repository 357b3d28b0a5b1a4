//! Panels and forms: plain layout containers.

use crate::context::CompilationContext;
use crate::elements::{
    array_literal, compile_conditional_properties, no_value_error, ControlBuilder, Element,
};
use crate::error::Result;
use crate::output::js;
use crate::widget::{NodeIndex, WidgetKind};

pub struct Container {
    kind: WidgetKind,
    index: NodeIndex,
}

impl Container {
    pub fn new(kind: WidgetKind, index: NodeIndex) -> Self {
        Container { kind, index }
    }
}

impl Element for Container {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        let content = ctx.compile_children(self.index)?;
        compile_conditional_properties(ctx, self)?;

        Ok(ControlBuilder::for_node(ctx, self.kind.as_str(), node)
            .optional_setting("title", node.caption.as_deref().map(js::quote))
            .setting("content", array_literal(&content))
            .render())
    }

    fn change_event(&self) -> Option<&'static str> {
        None
    }

    fn build_js_value_getter(&self, ctx: &mut CompilationContext, _column: Option<&str>) -> Result<String> {
        Err(no_value_error(ctx.tree.node(self.index)))
    }

    fn build_js_value_setter(
        &self,
        _ctx: &mut CompilationContext,
        _column: Option<&str>,
        _value_js: &str,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    fn build_js_set_required(&self, _ctx: &CompilationContext, _required: bool) -> String {
        String::new()
    }
}
