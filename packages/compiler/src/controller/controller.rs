//! Controller
//!
//! Per-view aggregator of everything the generated code registers: named
//! methods, dependent objects (lazily created per-view singletons), ordered
//! lifecycle scripts and event handlers. The controller is the only place that
//! emits event attachment code; elements just append script bodies.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::controller::{ControllerError, LifecyclePhase};
use crate::output::js::{self, CONTROLLER_VAR, EVENT_PARAM};
use crate::output::CodeWriter;

const DEPENDENT_OBJECTS: &str = "_dependentObjects";
const DEPENDENT_INIT: &str = "_dependentInit";
const DEPENDENT_GETTER: &str = "_getDependent";

/// Runs between two handler scripts of the same event. A script stops the ones
/// registered after it by setting `oEvent.bCancelled = true`.
pub const CANCELLED_GUARD: &str = "if (oEvent.bCancelled === true) return;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerMethod {
    pub param: String,
    pub body: String,
}

type EventKey = (String, String);

#[derive(Debug, Clone)]
pub struct Controller {
    view_id: String,
    methods: IndexMap<String, ControllerMethod>,
    properties: IndexMap<String, String>,
    lifecycle: IndexMap<LifecyclePhase, Vec<String>>,
    event_handlers: IndexMap<EventKey, Vec<String>>,
    /// Pairs whose dispatch expression was handed out to a control constructor.
    dispatched: IndexSet<EventKey>,
    /// Dispatch method name of every (element, event) pair seen so far.
    handler_names: IndexMap<String, EventKey>,
}

impl Controller {
    pub fn new(view_id: &str) -> Self {
        Controller {
            view_id: view_id.to_string(),
            methods: IndexMap::new(),
            properties: IndexMap::new(),
            lifecycle: IndexMap::new(),
            event_handlers: IndexMap::new(),
            dispatched: IndexSet::new(),
            handler_names: IndexMap::new(),
        }
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// Registers a controller method. Registering the same name again is only
    /// allowed with an identical parameter and body.
    pub fn add_method(&mut self, name: &str, param: &str, body: &str) -> Result<(), ControllerError> {
        if is_reserved(name) || self.handler_names.contains_key(name) {
            return Err(ControllerError::DuplicateMethod {
                name: name.to_string(),
            });
        }
        let method = ControllerMethod {
            param: param.to_string(),
            body: body.to_string(),
        };
        match self.methods.get(name) {
            Some(existing) if *existing == method => Ok(()),
            Some(_) => Err(ControllerError::DuplicateMethod {
                name: name.to_string(),
            }),
            None => {
                debug!("controller {}: method {}", self.view_id, name);
                self.methods.insert(name.to_string(), method);
                Ok(())
            }
        }
    }

    /// `oController.<name>`, for methods declared earlier in the same pass.
    pub fn method_accessor(&self, name: &str) -> Result<String, ControllerError> {
        let declared = self.methods.contains_key(name)
            || self.handler_names.contains_key(name)
            || LifecyclePhase::ALL
                .iter()
                .any(|p| p.is_method() && p.method_name() == name);
        if declared {
            Ok(format!("{}.{}", CONTROLLER_VAR, name))
        } else {
            Err(ControllerError::UndeclaredMethod {
                name: name.to_string(),
            })
        }
    }

    /// Declares a dependent object created by `init_expr` on first access.
    pub fn add_property(&mut self, name: &str, init_expr: &str) -> Result<(), ControllerError> {
        match self.properties.get(name) {
            Some(existing) if existing == init_expr => Ok(()),
            Some(_) => Err(ControllerError::DuplicateProperty {
                name: name.to_string(),
            }),
            None => {
                debug!("controller {}: dependent object {}", self.view_id, name);
                self.properties.insert(name.to_string(), init_expr.to_string());
                Ok(())
            }
        }
    }

    pub fn property_accessor(&self, name: &str) -> Result<String, ControllerError> {
        if self.properties.contains_key(name) {
            Ok(format!("{}.{}({})", CONTROLLER_VAR, DEPENDENT_GETTER, js::quote(name)))
        } else {
            Err(ControllerError::UndeclaredProperty {
                name: name.to_string(),
            })
        }
    }

    /// Appends a script to a lifecycle phase. Without `allow_duplicates`, a
    /// script whose exact text is already registered for the phase is skipped.
    pub fn add_lifecycle_script(&mut self, phase: LifecyclePhase, script: &str, allow_duplicates: bool) {
        let scripts = self.lifecycle.entry(phase).or_default();
        if !allow_duplicates && scripts.iter().any(|s| s == script) {
            return;
        }
        scripts.push(script.to_string());
    }

    pub fn lifecycle_scripts(&self, phase: LifecyclePhase) -> &[String] {
        self.lifecycle.get(&phase).map_or(&[], |s| s.as_slice())
    }

    /// Name of the method dispatching `event` of `element_id`, e.g. `onChangeInpName`.
    pub fn event_handler_name(element_id: &str, event: &str) -> String {
        js::member_name(&format!("on{}", js::upper_first(event)), element_id)
    }

    /// Appends a script to the handler of `event` on `element_id`. Scripts run in
    /// registration order inside one function, see [`CANCELLED_GUARD`].
    pub fn add_event_handler(
        &mut self,
        element_id: &str,
        event: &str,
        script: &str,
    ) -> Result<(), ControllerError> {
        let key = self.claim_handler_name(element_id, event)?;
        trace!("controller {}: handler for {}.{}", self.view_id, element_id, event);
        self.event_handlers
            .entry(key)
            .or_default()
            .push(script.to_string());
        Ok(())
    }

    pub fn event_handlers(&self, element_id: &str, event: &str) -> &[String] {
        self.event_handlers
            .get(&(element_id.to_string(), event.to_string()))
            .map_or(&[], |s| s.as_slice())
    }

    /// Expression to pass as `event` handler when constructing the control
    /// `element_id`. Handed out at most once per pair.
    pub fn build_event_dispatch_expression(
        &mut self,
        element_id: &str,
        event: &str,
    ) -> Result<String, ControllerError> {
        let key = self.claim_handler_name(element_id, event)?;
        if !self.dispatched.insert(key) {
            return Err(ControllerError::DuplicateDispatch {
                element_id: element_id.to_string(),
                event: event.to_string(),
            });
        }
        Ok(format!(
            "[{}.{}, {}]",
            CONTROLLER_VAR,
            Self::event_handler_name(element_id, event),
            CONTROLLER_VAR
        ))
    }

    fn claim_handler_name(&mut self, element_id: &str, event: &str) -> Result<EventKey, ControllerError> {
        let key = (element_id.to_string(), event.to_string());
        let name = Self::event_handler_name(element_id, event);
        let collision = match self.handler_names.get(&name) {
            Some(existing) => *existing != key,
            None => self.methods.contains_key(&name) || is_reserved(&name),
        };
        if collision {
            return Err(ControllerError::HandlerNameCollision {
                name,
                element_id: element_id.to_string(),
                event: event.to_string(),
            });
        }
        self.handler_names.insert(name, key.clone());
        Ok(key)
    }

    /// Module level statements of the `OnDefine` phase.
    pub fn render_define(&self) -> String {
        self.lifecycle_scripts(LifecyclePhase::OnDefine).join("\n")
    }

    /// The controller as an object literal.
    pub fn render(&self) -> String {
        let mut w = CodeWriter::new();
        w.println("{");
        w.inc_indent();

        for phase in LifecyclePhase::ALL.iter().filter(|p| p.is_method()) {
            render_function(&mut w, phase.method_name(), EVENT_PARAM, |w| {
                if *phase == LifecyclePhase::OnInit {
                    if !self.properties.is_empty() {
                        w.println(&format!("{}.{} = {{}};", CONTROLLER_VAR, DEPENDENT_OBJECTS));
                    }
                    self.render_attachments(w);
                }
                for script in self.lifecycle_scripts(*phase) {
                    w.print_block(script);
                }
            });
        }

        if !self.properties.is_empty() {
            self.render_dependent_objects(&mut w);
        }

        for (name, method) in &self.methods {
            render_function(&mut w, name, &method.param, |w| w.print_block(&method.body));
        }

        for (name, key) in &self.handler_names {
            let scripts = self.event_handlers.get(key).map_or(&[][..], |s| s.as_slice());
            render_function(&mut w, name, EVENT_PARAM, |w| {
                for (i, script) in scripts.iter().enumerate() {
                    if i > 0 {
                        w.println(CANCELLED_GUARD);
                    }
                    w.print_block(script);
                }
            });
        }

        w.dec_indent();
        w.println("}");
        w.to_source()
    }

    /// Handlers of controls that were constructed without a dispatch expression
    /// are attached once the view exists.
    fn render_attachments(&self, w: &mut CodeWriter) {
        for (name, key) in &self.handler_names {
            if self.dispatched.contains(key) {
                continue;
            }
            let (element_id, event) = key;
            let control = js::control_by_id(element_id);
            w.block(&format!("if ({}) {{", control), "}", |w| {
                w.println(&format!(
                    "{}.attachEvent({}, {}.{}, {});",
                    control,
                    js::quote(event),
                    CONTROLLER_VAR,
                    name,
                    CONTROLLER_VAR
                ));
            });
        }
    }

    fn render_dependent_objects(&self, w: &mut CodeWriter) {
        w.println(&format!("{}: {{", DEPENDENT_INIT));
        w.inc_indent();
        for (name, init) in &self.properties {
            w.println(&format!("{}: function ({}) {{", js::object_key(name), CONTROLLER_VAR));
            w.inc_indent();
            w.println(&format!("var {} = {}.getView();", js::VIEW_VAR, CONTROLLER_VAR));
            w.println(&format!("var {} = {}.getModel();", js::MODEL_VAR, js::VIEW_VAR));
            w.print_block(&format!("return {};", init));
            w.dec_indent();
            w.println("},");
        }
        w.dec_indent();
        w.println("},");

        w.block(&format!("{}: function (sName) {{", DEPENDENT_GETTER), "},", |w| {
            w.block(
                &format!("if (this.{}[sName] === undefined) {{", DEPENDENT_OBJECTS),
                "}",
                |w| {
                    w.println(&format!(
                        "this.{}[sName] = this.{}[sName](this);",
                        DEPENDENT_OBJECTS, DEPENDENT_INIT
                    ));
                },
            );
            w.println(&format!("return this.{}[sName];", DEPENDENT_OBJECTS));
        });
    }
}

fn is_reserved(name: &str) -> bool {
    name == DEPENDENT_OBJECTS
        || name == DEPENDENT_INIT
        || name == DEPENDENT_GETTER
        || LifecyclePhase::ALL.iter().any(|p| p.method_name() == name)
}

fn render_function<F>(w: &mut CodeWriter, name: &str, param: &str, body: F)
where
    F: FnOnce(&mut CodeWriter),
{
    w.println(&format!("{}: function ({}) {{", js::object_key(name), param));
    w.inc_indent();
    js::write_prelude(w, "this");
    body(w);
    w.dec_indent();
    w.println("},");
}
