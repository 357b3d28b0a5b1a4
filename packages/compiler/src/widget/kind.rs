//! Widget Kinds

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum WidgetKind {
    Panel,
    Form,
    Dialog,
    Input,
    InputHidden,
    InputCheckBox,
    Display,
    Button,
    DataTable,
    DataColumn,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Panel => "Panel",
            WidgetKind::Form => "Form",
            WidgetKind::Dialog => "Dialog",
            WidgetKind::Input => "Input",
            WidgetKind::InputHidden => "InputHidden",
            WidgetKind::InputCheckBox => "InputCheckBox",
            WidgetKind::Display => "Display",
            WidgetKind::Button => "Button",
            WidgetKind::DataTable => "DataTable",
            WidgetKind::DataColumn => "DataColumn",
        }
    }

    /// Widgets that start an independently initializable view with its own controller.
    pub fn is_view_root(&self) -> bool {
        matches!(self, WidgetKind::Dialog)
    }

    /// Widgets holding rows of data whose columns can be referenced by links.
    pub fn is_data_widget(&self) -> bool {
        matches!(self, WidgetKind::DataTable)
    }

    /// Prefix for ids generated for widgets that don't declare one.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            WidgetKind::Panel => "pnl",
            WidgetKind::Form => "frm",
            WidgetKind::Dialog => "dlg",
            WidgetKind::Input => "inp",
            WidgetKind::InputHidden => "hid",
            WidgetKind::InputCheckBox => "chk",
            WidgetKind::Display => "dsp",
            WidgetKind::Button => "btn",
            WidgetKind::DataTable => "dt",
            WidgetKind::DataColumn => "col",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
