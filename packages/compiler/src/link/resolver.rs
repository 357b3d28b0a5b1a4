//! Widget Link Resolver
//!
//! Turns a link expression into a uniform accessor. Elements never branch on
//! the shape of a reference: whether the value comes from the model, a control
//! getter, the prefill context or another page is decided here.

use std::rc::Rc;

use log::warn;

use crate::context::CompilationContext;
use crate::elements::Element;
use crate::error::{CompileError, Result};
use crate::link::{BrokenLinkError, BrokenLinkReason, Dependency, LinkTarget, WidgetLink};
use crate::output::js::{self, CONTROLLER_VAR};
use crate::translation;
use crate::widget::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// Whole value of a widget.
    WidgetValue,
    /// One column of the current row of a data widget.
    WidgetColumn,
    /// Column of the prefill context.
    Context,
    /// Widget on another page, looked up at runtime.
    CrossPage,
    /// Broken link rendered as a visible placeholder (lenient mode only).
    Placeholder,
}

pub struct ResolvedLink {
    pub link: WidgetLink,
    pub shape: LinkShape,
    pub target: Option<NodeIndex>,
    pub target_column: Option<String>,
    /// Model path of the value, when it lives at a fixed location.
    pub target_path: Option<String>,
    /// The target is rendered in another view and may not exist yet.
    pub unrendered: bool,
    /// What to subscribe to for change notifications.
    pub dependency: Option<Dependency>,
    getter: String,
    element: Option<Rc<dyn Element>>,
}

impl std::fmt::Debug for ResolvedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedLink")
            .field("link", &self.link)
            .field("shape", &self.shape)
            .field("target", &self.target)
            .field("target_column", &self.target_column)
            .field("target_path", &self.target_path)
            .field("unrendered", &self.unrendered)
            .field("dependency", &self.dependency)
            .field("getter", &self.getter)
            .finish()
    }
}

impl ResolvedLink {
    pub fn getter(&self) -> &str {
        &self.getter
    }

    /// Code writing `value_js` into the link target, `None` for read-only links.
    pub fn setter(&self, ctx: &mut CompilationContext, value_js: &str) -> Result<Option<String>> {
        if let Some(path) = &self.target_path {
            return Ok(Some(js::model_write(path, value_js)));
        }
        match (&self.shape, &self.element) {
            (LinkShape::WidgetValue | LinkShape::WidgetColumn, Some(element)) => {
                element.build_js_value_setter(ctx, self.target_column.as_deref(), value_js)
            }
            _ => Ok(None),
        }
    }
}

pub fn resolve_link(
    ctx: &mut CompilationContext,
    link: &WidgetLink,
    origin: NodeIndex,
) -> Result<ResolvedLink> {
    let tree = ctx.tree;
    let origin_node = tree.node(origin);

    if let Some(page) = &link.page {
        if page != tree.page() {
            if !ctx.config.cross_page_links {
                return broken(
                    ctx,
                    link,
                    origin,
                    BrokenLinkReason::ForeignPage(page.clone(), tree.page().to_string()),
                );
            }
            let getter = format!(
                "{}.getCrossPageValue({}, {}, {})",
                CONTROLLER_VAR,
                js::quote(page),
                js::quote(link.target_id().unwrap_or("~input")),
                link.column.as_deref().map_or("null".to_string(), js::quote)
            );
            return Ok(ResolvedLink {
                link: link.clone(),
                shape: LinkShape::CrossPage,
                target: None,
                target_column: link.column.clone(),
                target_path: None,
                unrendered: true,
                dependency: None,
                getter,
                element: None,
            });
        }
    }

    let target_id = match &link.target {
        LinkTarget::Context => {
            let column = link.column.as_deref().unwrap_or_default();
            let path = ctx.config.context_column_path(column);
            return Ok(ResolvedLink {
                link: link.clone(),
                shape: LinkShape::Context,
                target: None,
                target_column: link.column.clone(),
                target_path: Some(path.clone()),
                unrendered: false,
                dependency: Some(Dependency::ModelPath(path.clone())),
                getter: js::model_read(&path),
                element: None,
            });
        }
        LinkTarget::Widget(id) => id,
    };

    let Some(target) = tree.find(target_id) else {
        return broken(
            ctx,
            link,
            origin,
            BrokenLinkReason::TargetNotFound(target_id.clone()),
        );
    };
    let target_node = tree.node(target);
    let element = ctx.element(target)?;
    let unrendered = tree.view_root(target) != tree.view_root(origin);

    let column = match link.column.as_deref() {
        Some(column) if target_node.kind.is_data_widget() => {
            match element.resolve_column(ctx, column) {
                Some(data_column) => Some(data_column),
                None => {
                    return Err(CompileError::configuration(
                        origin_node,
                        format!(
                            "link `{}` refers to column \"{}\" which {} \"{}\" does not have",
                            link, column, target_node.kind, target_node.id
                        ),
                    ))
                }
            }
        }
        Some(column) if target_node.column_name.as_deref() == Some(column) => None,
        Some(column) => {
            return Err(CompileError::configuration(
                origin_node,
                format!(
                    "link `{}` refers to column \"{}\" but {} \"{}\" holds a single value",
                    link, column, target_node.kind, target_node.id
                ),
            ))
        }
        None => None,
    };

    let mut resolved = ResolvedLink {
        link: link.clone(),
        shape: if column.is_some() {
            LinkShape::WidgetColumn
        } else {
            LinkShape::WidgetValue
        },
        target: Some(target),
        target_column: column.clone(),
        target_path: None,
        unrendered,
        dependency: None,
        getter: String::new(),
        element: Some(element.clone()),
    };

    if column.is_none() {
        let decision = ctx.resolve_binding(target, element.value_property());
        if decision.is_absolute() {
            resolved.getter = js::model_read(&decision.path);
            resolved.dependency = Some(Dependency::ModelPath(decision.path.clone()));
            resolved.target_path = Some(decision.path);
            return Ok(resolved);
        }
    }

    let getter = element.build_js_value_getter(ctx, column.as_deref())?;
    resolved.getter = if unrendered && ctx.config.guard_unrendered_links {
        format!("({} ? {} : null)", js::control_by_id(&target_node.id), getter)
    } else {
        getter
    };
    resolved.dependency = element.change_dependency(ctx)?;
    Ok(resolved)
}

fn broken(
    ctx: &CompilationContext,
    link: &WidgetLink,
    origin: NodeIndex,
    reason: BrokenLinkReason,
) -> Result<ResolvedLink> {
    let origin_node = ctx.tree.node(origin);
    let error = BrokenLinkError {
        expression: link.to_string(),
        target_id: link.target_id().unwrap_or_default().to_string(),
        origin_id: origin_node.id.clone(),
        origin_kind: origin_node.kind,
        reason,
    };
    if !ctx.config.lenient_links {
        return Err(error.into());
    }
    warn!("{}; rendering placeholder", error);
    let text = format!(
        "[{}: {}]",
        ctx.translator.translate(translation::BROKEN_LINK),
        link
    );
    Ok(ResolvedLink {
        link: link.clone(),
        shape: LinkShape::Placeholder,
        target: None,
        target_column: link.column.clone(),
        target_path: None,
        unrendered: false,
        dependency: None,
        getter: js::quote(&text),
        element: None,
    })
}
