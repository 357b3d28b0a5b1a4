//! Lifecycle Phases

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecyclePhase {
    OnInit,
    /// Module level, runs once when the controller is defined.
    OnDefine,
    OnShowView,
    OnHideView,
    OnPrefillBeforeLoad,
    OnPrefillDataChanged,
    OnRouteMatched,
}

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; 7] = [
        LifecyclePhase::OnInit,
        LifecyclePhase::OnDefine,
        LifecyclePhase::OnShowView,
        LifecyclePhase::OnHideView,
        LifecyclePhase::OnPrefillBeforeLoad,
        LifecyclePhase::OnPrefillDataChanged,
        LifecyclePhase::OnRouteMatched,
    ];

    /// Name of the controller method running the phase's scripts.
    pub fn method_name(&self) -> &'static str {
        match self {
            LifecyclePhase::OnInit => "onInit",
            LifecyclePhase::OnDefine => "onDefine",
            LifecyclePhase::OnShowView => "onShowView",
            LifecyclePhase::OnHideView => "onHideView",
            LifecyclePhase::OnPrefillBeforeLoad => "onPrefillBeforeLoad",
            LifecyclePhase::OnPrefillDataChanged => "onPrefillDataChanged",
            LifecyclePhase::OnRouteMatched => "onRouteMatched",
        }
    }

    /// Phases rendered as controller methods (all but `OnDefine`).
    pub fn is_method(&self) -> bool {
        *self != LifecyclePhase::OnDefine
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}
