//! Widget Links
//!
//! Reference expressions pointing at another widget's value, one column of a
//! data widget, or the prefill context:
//!
//! - `=inpName`
//! - `=dtOrders!STATUS`
//! - `=~input!ORDER_ID`
//! - `=[other.page]inpName` (widget on another page)

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static WIDGET_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^=(?:\[([^\]]+)\])?(~input|~context|[A-Za-z_][A-Za-z0-9_.\-]*)(?:!([A-Za-z_][A-Za-z0-9_.\-]*))?$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    Widget(String),
    /// Data the view was prefilled with.
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetLink {
    pub page: Option<String>,
    pub target: LinkTarget,
    pub column: Option<String>,
}

impl WidgetLink {
    pub fn to_widget(id: &str) -> Self {
        WidgetLink {
            page: None,
            target: LinkTarget::Widget(id.to_string()),
            column: None,
        }
    }

    /// Returns `None` if the text is not a link expression.
    pub fn parse(text: &str) -> Option<WidgetLink> {
        let caps = WIDGET_LINK_RE.captures(text.trim())?;
        let page = caps.get(1).map(|m| m.as_str().to_string());
        let column = caps.get(3).map(|m| m.as_str().to_string());
        let target = match caps.get(2)?.as_str() {
            "~input" | "~context" => {
                // a context link without a column has nothing to read
                column.as_ref()?;
                LinkTarget::Context
            }
            id => LinkTarget::Widget(id.to_string()),
        };
        Some(WidgetLink {
            page,
            target,
            column,
        })
    }

    pub fn target_id(&self) -> Option<&str> {
        match &self.target {
            LinkTarget::Widget(id) => Some(id),
            LinkTarget::Context => None,
        }
    }
}

impl fmt::Display for WidgetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("=")?;
        if let Some(page) = &self.page {
            write!(f, "[{}]", page)?;
        }
        match &self.target {
            LinkTarget::Widget(id) => f.write_str(id)?,
            LinkTarget::Context => f.write_str("~input")?,
        }
        if let Some(column) = &self.column {
            write!(f, "!{}", column)?;
        }
        Ok(())
    }
}
