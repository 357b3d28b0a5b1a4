//! Compilation Context
//!
//! Everything one compilation shares: the tree, the collaborators, the element
//! cache, per-element binding state, the binding registry and one controller per
//! view. Passed explicitly through every element; there is no global state.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{trace, warn};

use crate::binding::{BindingDecision, BindingOverrides, BindingResolver};
use crate::config::CompilerConfig;
use crate::controller::{Controller, LifecyclePhase};
use crate::elements::{Element, ElementRegistry};
use crate::error::{CompileError, InWidget, Result};
use crate::link::{self, Dependency, ResolvedLink, WidgetLink};
use crate::model::ModelBindings;
use crate::output::js::{self, CONTROLLER_VAR};
use crate::server::ServerAdapter;
use crate::translation::Translator;
use crate::widget::{NodeIndex, WidgetKind, WidgetTree};

/// Per-element-instance state. Lives here rather than on the node so the same
/// node can be compiled in more than one place.
#[derive(Debug, Clone, Default)]
pub struct ElementState {
    pub overrides: BindingOverrides,
    /// Model prefix for the element's bindings; the configured model root if unset.
    pub prefix: Option<String>,
}

/// Data tables always bind their rows; columns bind relative to the current row.
fn initial_state(kind: WidgetKind) -> ElementState {
    match kind {
        WidgetKind::DataTable => ElementState {
            overrides: BindingOverrides {
                force_bound: Some(true),
                binding_disabled: false,
            },
            prefix: None,
        },
        WidgetKind::DataColumn => ElementState {
            overrides: BindingOverrides::default(),
            prefix: Some(String::new()),
        },
        _ => ElementState::default(),
    }
}

/// One independently initializable view: the page itself or a dialog.
#[derive(Debug)]
pub struct ViewUnit {
    pub root: NodeIndex,
    pub controller: Controller,
    pub content: String,
}

impl ViewUnit {
    fn new(root: NodeIndex, view_id: &str) -> Self {
        ViewUnit {
            root,
            controller: Controller::new(view_id),
            content: String::new(),
        }
    }
}

pub struct CompilationContext<'a> {
    pub tree: &'a WidgetTree,
    pub config: &'a CompilerConfig,
    pub model: &'a dyn ModelBindings,
    pub server: &'a dyn ServerAdapter,
    pub translator: &'a dyn Translator,
    registry: &'a ElementRegistry,
    elements: HashMap<NodeIndex, Rc<dyn Element>>,
    states: HashMap<NodeIndex, ElementState>,
    bindings: BindingResolver,
    root_view: ViewUnit,
    /// Views currently being compiled, innermost last.
    open_views: Vec<ViewUnit>,
    finished_views: Vec<ViewUnit>,
    subscriptions: HashSet<(NodeIndex, Dependency, String)>,
    /// Widgets whose value links are being followed, innermost last.
    following: Vec<NodeIndex>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(
        tree: &'a WidgetTree,
        config: &'a CompilerConfig,
        model: &'a dyn ModelBindings,
        server: &'a dyn ServerAdapter,
        translator: &'a dyn Translator,
        registry: &'a ElementRegistry,
    ) -> Self {
        let root = tree.root();
        CompilationContext {
            tree,
            config,
            model,
            server,
            translator,
            registry,
            elements: HashMap::new(),
            states: HashMap::new(),
            bindings: BindingResolver::new(config.binding_conflict_policy),
            root_view: ViewUnit::new(root, &tree.node(root).id),
            open_views: Vec::new(),
            finished_views: Vec::new(),
            subscriptions: HashSet::new(),
            following: Vec::new(),
        }
    }

    /// The element for a node, created on first access.
    pub fn element(&mut self, index: NodeIndex) -> Result<Rc<dyn Element>> {
        if let Some(element) = self.elements.get(&index) {
            return Ok(element.clone());
        }
        let tree = self.tree;
        let node = tree.node(index);
        let element = self.registry.create(node.kind, index).ok_or_else(|| {
            CompileError::configuration(node, format!("no element registered for {}", node.kind))
        })?;
        self.elements.insert(index, element.clone());
        Ok(element)
    }

    pub fn compile_node(&mut self, index: NodeIndex) -> Result<String> {
        let element = self.element(index)?;
        element.compile(self)
    }

    /// Compiled fragments of all children, in declaration order.
    pub fn compile_children(&mut self, index: NodeIndex) -> Result<Vec<String>> {
        let tree = self.tree;
        let mut fragments = Vec::with_capacity(tree.node(index).children.len());
        for child in &tree.node(index).children {
            let fragment = self.compile_node(*child)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
        Ok(fragments)
    }

    pub fn resolve_binding(&mut self, index: NodeIndex, property: &str) -> BindingDecision {
        let state = self
            .states
            .get(&index)
            .cloned()
            .unwrap_or_else(|| initial_state(self.tree.node(index).kind));
        let prefix = state
            .prefix
            .unwrap_or_else(|| self.config.model_root.clone());
        self.bindings
            .resolve(self.tree, self.model, index, property, &state.overrides, &prefix)
    }

    /// State of an element about to change; earlier decisions no longer apply.
    fn state_mut(&mut self, index: NodeIndex) -> &mut ElementState {
        self.bindings.invalidate(index);
        let kind = self.tree.node(index).kind;
        self.states
            .entry(index)
            .or_insert_with(|| initial_state(kind))
    }

    pub fn set_binding_prefix(&mut self, index: NodeIndex, prefix: &str) {
        self.state_mut(index).prefix = Some(prefix.to_string());
    }

    pub fn set_force_bound(&mut self, index: NodeIndex, bound: bool) {
        self.state_mut(index).overrides.force_bound = Some(bound);
    }

    pub fn disable_binding(&mut self, index: NodeIndex) {
        self.state_mut(index).overrides.binding_disabled = true;
    }

    pub fn resolve_link(&mut self, link: &WidgetLink, origin: NodeIndex) -> Result<ResolvedLink> {
        link::resolve_link(self, link, origin)
    }

    /// Resolves the value link of `index` on behalf of a widget reading it.
    /// Fails when value links lead back to a widget already being followed.
    pub fn follow_value_link(&mut self, index: NodeIndex, link: &WidgetLink) -> Result<ResolvedLink> {
        if self.following.contains(&index) {
            return Err(CompileError::configuration(
                self.tree.node(index),
                format!("value link `{}` leads back to this widget", link),
            ));
        }
        self.following.push(index);
        let resolved = self.resolve_link(link, index);
        self.following.pop();
        resolved
    }

    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    fn current_view(&self) -> &ViewUnit {
        self.open_views.last().unwrap_or(&self.root_view)
    }

    fn current_view_mut(&mut self) -> &mut ViewUnit {
        match self.open_views.last_mut() {
            Some(view) => view,
            None => &mut self.root_view,
        }
    }

    /// Controller of the view currently being compiled.
    pub fn controller(&mut self) -> &mut Controller {
        &mut self.current_view_mut().controller
    }

    pub fn current_view_root(&self) -> NodeIndex {
        self.current_view().root
    }

    /// Opens a nested view rooted at `root`. Registrations go to its controller
    /// until the matching `end_view`.
    pub fn begin_view(&mut self, root: NodeIndex) {
        let view = ViewUnit::new(root, &self.tree.node(root).id);
        self.open_views.push(view);
    }

    pub fn end_view(&mut self, content: String) -> Result<()> {
        let mut view = self.open_views.pop().ok_or_else(|| {
            CompileError::InvalidTree("view closed without being opened".to_string())
        })?;
        view.content = content;
        self.finished_views.push(view);
        Ok(())
    }

    pub fn set_root_content(&mut self, content: String) {
        self.root_view.content = content;
    }

    /// All views, the page first, then nested views in the order they finished.
    pub fn into_views(self) -> Vec<ViewUnit> {
        let mut views = Vec::with_capacity(1 + self.finished_views.len());
        views.push(self.root_view);
        views.extend(self.finished_views);
        views
    }

    /// Calls `method` of the current controller whenever `dependency` changes.
    /// Registered once per (view, dependency, method).
    pub fn subscribe(&mut self, origin: NodeIndex, dependency: &Dependency, method: &str) -> Result<()> {
        let key = (self.current_view_root(), dependency.clone(), method.to_string());
        if !self.subscriptions.insert(key) {
            return Ok(());
        }
        trace!("{} subscribes to {:?}", method, dependency);
        let call = format!("{}.{}();", CONTROLLER_VAR, method);
        match dependency {
            Dependency::Event { element_id, event } => {
                let tree = self.tree;
                let node = tree.node(origin);
                if let Some(target) = tree.find(element_id) {
                    let view_root = tree.view_root(target);
                    if view_root != self.current_view_root() {
                        warn!(
                            "{} of \"{}\" listens to \"{}\" in view \"{}\", it is only attached if that view exists when \"{}\" initializes",
                            method,
                            node.id,
                            element_id,
                            tree.node(view_root).id,
                            tree.node(self.current_view_root()).id
                        );
                    }
                }
                self.controller()
                    .add_event_handler(element_id, event, &call)
                    .in_widget(node)
            }
            Dependency::ModelPath(path) => {
                let script = format!(
                    "{}.bindProperty({}).attachChange(function () {{\n    {}\n}});",
                    js::MODEL_VAR,
                    js::quote(path),
                    call
                );
                self.controller()
                    .add_lifecycle_script(LifecyclePhase::OnInit, &script, false);
                Ok(())
            }
        }
    }
}
