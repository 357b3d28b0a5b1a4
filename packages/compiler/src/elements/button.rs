//! Buttons
//!
//! A press runs, in order: the server action (with the view busy while the
//! request is pending), then opening or closing a dialog. Closing after an
//! action waits for the action to succeed.

use crate::context::CompilationContext;
use crate::elements::{compile_conditional_properties, no_value_error, ControlBuilder, Element};
use crate::error::{CompileError, InWidget, Result};
use crate::output::js::{self, CONTROLLER_VAR, VIEW_VAR};
use crate::output::CodeWriter;
use crate::server::ServerRequest;
use crate::translation;
use crate::widget::{NodeIndex, WidgetKind, WidgetNode};

pub const PRESS_EVENT: &str = "press";

pub struct Button {
    index: NodeIndex,
}

impl Button {
    pub fn new(index: NodeIndex) -> Self {
        Button { index }
    }

    fn open_dialog_script(&self, ctx: &CompilationContext, node: &WidgetNode) -> Result<Option<String>> {
        let Some(dialog_id) = &node.open_dialog else {
            return Ok(None);
        };
        let is_dialog = ctx
            .tree
            .find(dialog_id)
            .map(|target| ctx.tree.node(target).kind == WidgetKind::Dialog);
        match is_dialog {
            Some(true) => Ok(Some(format!(
                "{}.openView({});",
                CONTROLLER_VAR,
                js::quote(dialog_id)
            ))),
            Some(false) => Err(CompileError::configuration(
                node,
                format!("opens \"{}\" which is not a dialog", dialog_id),
            )),
            None => Err(CompileError::configuration(
                node,
                format!("opens dialog \"{}\" which does not exist", dialog_id),
            )),
        }
    }

    fn close_dialog_script(&self, ctx: &CompilationContext, node: &WidgetNode) -> Result<Option<String>> {
        if !node.close_dialog {
            return Ok(None);
        }
        if ctx.tree.closest(self.index, WidgetKind::Dialog).is_none() {
            return Err(CompileError::configuration(
                node,
                "closes its dialog but is not placed inside one",
            ));
        }
        Ok(Some(format!("{}.closeView();", CONTROLLER_VAR)))
    }

    fn action_script(&self, ctx: &CompilationContext, action: &str, on_success: &str) -> String {
        let error_text = ctx.translate(translation::ACTION_FAILED);
        let mut success = CodeWriter::new();
        success.println(&format!("{}.setBusy(false);", VIEW_VAR));
        success.print_block(on_success);
        let mut failure = CodeWriter::new();
        failure.println(&format!("{}.setBusy(false);", VIEW_VAR));
        failure.println(&format!(
            "{}.showError(oError, {});",
            CONTROLLER_VAR,
            js::quote(&error_text)
        ));

        let params = js::model_read(&ctx.config.model_root);
        let request = ctx.server.build_request(&ServerRequest {
            action,
            result_sink: None,
            params: &params,
            on_success: &success.to_source(),
            on_error: &failure.to_source(),
        });

        let mut w = CodeWriter::new();
        w.println(&format!("{}.setBusy(true);", VIEW_VAR));
        w.print_block(&request);
        w.to_source()
    }
}

impl Element for Button {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);

        let open = self.open_dialog_script(ctx, node)?;
        let close = self.close_dialog_script(ctx, node)?;
        let mut scripts = Vec::new();
        match &node.action {
            Some(action) => {
                let after = [open.as_deref(), close.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join("\n");
                scripts.push(self.action_script(ctx, action, &after));
            }
            None => scripts.extend(open.into_iter().chain(close)),
        }
        for script in &scripts {
            ctx.controller()
                .add_event_handler(&node.id, PRESS_EVENT, script)
                .in_widget(node)?;
        }

        compile_conditional_properties(ctx, self)?;

        let dispatch = ctx
            .controller()
            .build_event_dispatch_expression(&node.id, PRESS_EVENT)
            .in_widget(node)?;
        Ok(ControlBuilder::for_node(ctx, "Button", node)
            .setting("text", js::quote(node.caption_or_id()))
            .setting(PRESS_EVENT, dispatch)
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
