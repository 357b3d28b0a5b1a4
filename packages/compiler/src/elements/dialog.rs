//! Dialogs
//!
//! A dialog nested in a page is a view of its own: it gets its own controller,
//! its own prefill and is opened and closed at runtime by buttons. The parent
//! does not render anything for it.

use log::debug;

use crate::context::CompilationContext;
use crate::controller::LifecyclePhase;
use crate::elements::{
    array_literal, compile_conditional_properties, no_value_error, ControlBuilder, Element,
};
use crate::error::Result;
use crate::output::js;
use crate::prefill::register_prefill;
use crate::widget::NodeIndex;

pub struct Dialog {
    index: NodeIndex,
}

impl Dialog {
    pub fn new(index: NodeIndex) -> Self {
        Dialog { index }
    }
}

impl Element for Dialog {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        let nested = ctx.current_view_root() != self.index;
        if nested {
            debug!("dialog \"{}\" compiles into a view of its own", node.id);
            ctx.begin_view(self.index);
        }

        register_prefill(ctx, self.index)?;
        let content = ctx.compile_children(self.index)?;
        compile_conditional_properties(ctx, self)?;

        if node.prefill_action.is_some() {
            let reset = format!("{};", js::model_write(&ctx.config.context_path, "{}"));
            ctx.controller()
                .add_lifecycle_script(LifecyclePhase::OnHideView, &reset, false);
        }

        let control = ControlBuilder::for_node(ctx, "Dialog", node)
            .optional_setting("title", node.caption.as_deref().map(js::quote))
            .setting("content", array_literal(&content))
            .render();

        if nested {
            ctx.end_view(control)?;
            Ok(String::new())
        } else {
            Ok(control)
        }
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
