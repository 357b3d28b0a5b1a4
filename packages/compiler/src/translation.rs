//! Translation
//!
//! Texts the compiler itself puts into generated code (error messages, empty
//! table hints) go through a translator.

use indexmap::IndexMap;

pub const NO_DATA: &str = "WIDGET.DATATABLE.NO_DATA";
pub const ACTION_FAILED: &str = "ERROR.ACTION_FAILED";
pub const PREFILL_FAILED: &str = "ERROR.PREFILL_FAILED";
pub const BROKEN_LINK: &str = "ERROR.BROKEN_LINK";

pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Dictionary backed translator. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    messages: IndexMap<String, String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// English texts for all built-in keys.
    pub fn with_defaults() -> Self {
        let mut t = Self::new();
        t.insert(NO_DATA, "No data");
        t.insert(ACTION_FAILED, "The action could not be performed");
        t.insert(PREFILL_FAILED, "Failed to load data");
        t.insert(BROKEN_LINK, "Broken widget link");
        t
    }

    pub fn insert(&mut self, key: &str, text: &str) {
        self.messages.insert(key.to_string(), text.to_string());
    }

    pub fn extend<'a>(&mut self, messages: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (k, v) in messages {
            self.insert(k, v);
        }
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_key() {
        let t = StaticTranslator::with_defaults();
        assert_eq!(t.translate(NO_DATA), "No data");
        assert_eq!(t.translate("UNKNOWN.KEY"), "UNKNOWN.KEY");
    }
}
