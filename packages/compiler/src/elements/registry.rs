//! Element Registry
//!
//! Maps widget kinds to element constructors. Hosts can replace the element of
//! a kind before compiling.

use std::collections::HashMap;
use std::rc::Rc;

use crate::elements::{Button, Container, DataColumn, DataTable, Dialog, Display, Element, Input};
use crate::widget::{NodeIndex, WidgetKind};

pub type ElementConstructor = fn(WidgetKind, NodeIndex) -> Rc<dyn Element>;

#[derive(Clone)]
pub struct ElementRegistry {
    constructors: HashMap<WidgetKind, ElementConstructor>,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        let mut registry = ElementRegistry::empty();
        registry.register(WidgetKind::Panel, container);
        registry.register(WidgetKind::Form, container);
        registry.register(WidgetKind::Dialog, dialog);
        registry.register(WidgetKind::Input, input);
        registry.register(WidgetKind::InputHidden, input);
        registry.register(WidgetKind::InputCheckBox, input);
        registry.register(WidgetKind::Display, display);
        registry.register(WidgetKind::Button, button);
        registry.register(WidgetKind::DataTable, data_table);
        registry.register(WidgetKind::DataColumn, data_column);
        registry
    }
}

fn container(kind: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(Container::new(kind, index))
}

fn dialog(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(Dialog::new(index))
}

fn input(kind: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(Input::new(kind, index))
}

fn display(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(Display::new(index))
}

fn button(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(Button::new(index))
}

fn data_table(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(DataTable::new(index))
}

fn data_column(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(DataColumn::new(index))
}

impl ElementRegistry {
    /// Registry without any element.
    pub fn empty() -> Self {
        ElementRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for `kind`.
    pub fn register(&mut self, kind: WidgetKind, constructor: ElementConstructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn create(&self, kind: WidgetKind, index: NodeIndex) -> Option<Rc<dyn Element>> {
        self.constructors.get(&kind).map(|constructor| constructor(kind, index))
    }
}

impl std::fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("ElementRegistry").field("kinds", &kinds).finish()
    }
}
