//! Compiler Configuration
//!
//! Policy knobs of a compilation. Deserialized from camelCase JSON; every field
//! has a default so an empty object is a valid configuration.

use indexmap::IndexMap;
use serde::Deserialize;

/// What happens when two unrelated widgets would bind to the same model path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingConflictPolicy {
    /// The widget resolved second becomes static.
    #[default]
    FallbackToStatic,
    /// Both widgets bind to the same path.
    Share,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Editor/preview mode: broken widget links render a placeholder instead of
    /// failing the compilation.
    pub lenient_links: bool,
    /// Allow links to widgets on other pages (resolved at runtime).
    pub cross_page_links: bool,
    pub binding_conflict_policy: BindingConflictPolicy,
    /// Null-guard getters of link targets that live in another view.
    pub guard_unrendered_links: bool,
    /// Model path the prefill/context data is loaded into.
    pub context_path: String,
    /// Prefix of absolute model paths for page-level widgets.
    pub model_root: String,
    /// Namespace of the target runtime's control constructors.
    pub control_namespace: String,
    /// Default page size of data tables that don't declare one.
    pub default_page_size: u32,
    /// Overrides for built-in texts, keyed by translation key.
    pub translations: IndexMap<String, String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            lenient_links: false,
            cross_page_links: false,
            binding_conflict_policy: BindingConflictPolicy::FallbackToStatic,
            guard_unrendered_links: true,
            context_path: "/_context".to_string(),
            model_root: "/".to_string(),
            control_namespace: "ui".to_string(),
            default_page_size: 20,
            translations: IndexMap::new(),
        }
    }
}

impl CompilerConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Model path of a column inside the context data.
    pub fn context_column_path(&self, column: &str) -> String {
        format!("{}/{}", self.context_path.trim_end_matches('/'), column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_defaults_for_missing_fields() {
        let config = CompilerConfig::from_json_str(r#"{"lenientLinks": true}"#).unwrap();
        assert!(config.lenient_links);
        assert!(config.guard_unrendered_links);
        assert_eq!(config.context_path, "/_context");
        assert_eq!(config.binding_conflict_policy, BindingConflictPolicy::FallbackToStatic);
    }

    #[test]
    fn should_parse_conflict_policy() {
        let config =
            CompilerConfig::from_json_str(r#"{"bindingConflictPolicy": "share"}"#).unwrap();
        assert_eq!(config.binding_conflict_policy, BindingConflictPolicy::Share);
    }

    #[test]
    fn should_build_context_column_paths() {
        let config = CompilerConfig::default();
        assert_eq!(config.context_column_path("ORDER_ID"), "/_context/ORDER_ID");
    }
}
