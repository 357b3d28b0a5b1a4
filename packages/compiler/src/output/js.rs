//! JavaScript Helpers
//!
//! Quoting, identifier handling and the variable names shared by all generated
//! code. Every generated method and view factory declares these variables in
//! its prelude.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::output::CodeWriter;

pub const CONTROLLER_VAR: &str = "oController";
pub const VIEW_VAR: &str = "oView";
pub const MODEL_VAR: &str = "oModel";
pub const EVENT_PARAM: &str = "oEvent";

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").unwrap());

/// Single-quoted JavaScript string literal.
pub fn quote(input: &str) -> String {
    let mut escaped = input.replace('\\', "\\\\");
    escaped = escaped.replace('\'', "\\'");
    escaped = escaped.replace('\n', "\\n");
    escaped = escaped.replace('\r', "\\r");
    format!("'{}'", escaped)
}

pub fn is_legal_identifier(input: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(input)
}

/// Object key, quoted only when it is not a legal identifier.
pub fn object_key(input: &str) -> String {
    if is_legal_identifier(input) {
        input.to_string()
    } else {
        quote(input)
    }
}

/// Replace characters that are not allowed in identifiers by underscores.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect()
}

pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Controller member name namespaced by widget: `<prefix><WidgetId>`, e.g.
/// `onChangeInpName` or `applyDisabledIfBtnSave`.
pub fn member_name(prefix: &str, element_id: &str) -> String {
    format!("{}{}", prefix, upper_first(&sanitize_identifier(element_id)))
}

/// Expression resolving the control with the given id at runtime.
pub fn control_by_id(element_id: &str) -> String {
    format!("{}.byId({})", CONTROLLER_VAR, quote(element_id))
}

pub fn model_read(path: &str) -> String {
    format!("{}.getProperty({})", MODEL_VAR, quote(path))
}

pub fn model_write(path: &str, value_js: &str) -> String {
    format!("{}.setProperty({}, {})", MODEL_VAR, quote(path), value_js)
}

/// Declarations every generated function starts with.
pub fn write_prelude(w: &mut CodeWriter, controller_expr: &str) {
    w.println(&format!("var {} = {};", CONTROLLER_VAR, controller_expr));
    w.println(&format!("var {} = {}.getView();", VIEW_VAR, CONTROLLER_VAR));
    w.println(&format!("var {} = {}.getModel();", MODEL_VAR, VIEW_VAR));
}
