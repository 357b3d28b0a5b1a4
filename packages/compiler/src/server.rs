//! Server Adapter
//!
//! Composes calls to the host application's request layer. Transport is not the
//! compiler's business: the adapter only decides what the generated call looks
//! like.

use crate::output::js::{self, CONTROLLER_VAR};
use crate::output::CodeWriter;

/// One "fire request, resume via callback" call.
#[derive(Debug, Clone)]
pub struct ServerRequest<'r> {
    pub action: &'r str,
    /// Model path the response data is written to, if any.
    pub result_sink: Option<&'r str>,
    /// JavaScript expression evaluating to the request parameters.
    pub params: &'r str,
    pub on_success: &'r str,
    pub on_error: &'r str,
}

pub trait ServerAdapter {
    fn build_request(&self, request: &ServerRequest<'_>) -> String;
}

/// Emits promise-style calls through the controller's server accessor:
/// `oController.getServer().call({...}).then(success, error)`.
#[derive(Debug, Clone, Default)]
pub struct PromiseServerAdapter;

impl ServerAdapter for PromiseServerAdapter {
    fn build_request(&self, request: &ServerRequest<'_>) -> String {
        let mut w = CodeWriter::new();
        w.println(&format!(
            "{}.getServer().call({{action: {}, params: {}}}).then(function (oData) {{",
            CONTROLLER_VAR,
            js::quote(request.action),
            request.params
        ));
        w.inc_indent();
        if let Some(path) = request.result_sink {
            w.println(&format!("{};", js::model_write(path, "oData")));
        }
        w.print_block(request.on_success);
        w.dec_indent();
        w.println("}, function (oError) {");
        w.inc_indent();
        w.print_block(request.on_error);
        w.dec_indent();
        w.println("});");
        w.to_source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_write_response_into_result_sink() {
        let code = PromiseServerAdapter.build_request(&ServerRequest {
            action: "read",
            result_sink: Some("/orders"),
            params: "{}",
            on_success: "done();",
            on_error: "fail();",
        });
        assert!(code.contains("call({action: 'read', params: {}})"));
        assert!(code.contains("oModel.setProperty('/orders', oData);"));
        let success = code.find("done();").unwrap();
        let error = code.find("fail();").unwrap();
        assert!(success < error);
    }
}
