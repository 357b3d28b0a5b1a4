//! Prefill
//!
//! Views declaring a prefill action load their context data when shown. A load
//! that starts while another one is pending is skipped, never queued.

use crate::context::CompilationContext;
use crate::controller::LifecyclePhase;
use crate::error::{InWidget, Result};
use crate::output::js::{self, CONTROLLER_VAR, VIEW_VAR};
use crate::output::CodeWriter;
use crate::server::ServerRequest;
use crate::translation;
use crate::widget::NodeIndex;

pub const LOAD_PREFILL_METHOD: &str = "loadPrefill";
const PENDING_FLAG: &str = "_prefillPending";

/// Registers the prefill loader of the view rooted at `view_root`, if the root
/// declares a prefill action.
pub fn register_prefill(ctx: &mut CompilationContext, view_root: NodeIndex) -> Result<()> {
    let tree = ctx.tree;
    let node = tree.node(view_root);
    let Some(action) = &node.prefill_action else {
        return Ok(());
    };

    let pending = format!("{}.{}", CONTROLLER_VAR, PENDING_FLAG);
    let error_text = ctx.translate(translation::PREFILL_FAILED);
    let on_success = format!(
        "{} = false;\n{}.setBusy(false);\n{}.onPrefillDataChanged();",
        pending, VIEW_VAR, CONTROLLER_VAR
    );
    let on_error = format!(
        "{} = false;\n{}.setBusy(false);\n{}.showError(oError, {});",
        pending,
        VIEW_VAR,
        CONTROLLER_VAR,
        js::quote(&error_text)
    );
    let params = format!("{}.getRouteParams()", CONTROLLER_VAR);
    let request = ctx.server.build_request(&ServerRequest {
        action,
        result_sink: Some(&ctx.config.context_path),
        params: &params,
        on_success: &on_success,
        on_error: &on_error,
    });

    let mut w = CodeWriter::new();
    w.block(&format!("if ({} === true) {{", pending), "}", |w| {
        w.println("return;")
    });
    w.println(&format!("{} = true;", pending));
    w.println(&format!("{}.setBusy(true);", VIEW_VAR));
    w.println(&format!("{}.onPrefillBeforeLoad();", CONTROLLER_VAR));
    w.print_block(&request);

    let load = format!("{}.{}();", CONTROLLER_VAR, LOAD_PREFILL_METHOD);
    let controller = ctx.controller();
    controller
        .add_method(LOAD_PREFILL_METHOD, "", &w.to_source())
        .in_widget(node)?;
    controller.add_lifecycle_script(LifecyclePhase::OnInit, &format!("{} = false;", pending), false);
    controller.add_lifecycle_script(LifecyclePhase::OnShowView, &load, false);
    controller.add_lifecycle_script(LifecyclePhase::OnRouteMatched, &load, false);
    Ok(())
}
