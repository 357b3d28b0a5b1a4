//! Controller Tests
//!
//! Aggregation of handlers, methods and lifecycle scripts across elements that
//! are compiled independently of each other.

use serde_json::json;
use widget_compiler::context::CompilationContext;
use widget_compiler::controller::{LifecyclePhase, CANCELLED_GUARD};
use widget_compiler::elements::ElementRegistry;
use widget_compiler::server::PromiseServerAdapter;
use widget_compiler::translation::StaticTranslator;
use widget_compiler::{CompilerConfig, PrefillModel, WidgetCompiler, WidgetTree};

fn page_with_three_dependents() -> serde_json::Value {
    json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpName"},
            {
                "widget_type": "Display",
                "id": "dspHint",
                "value": "Please enter a name",
                "hidden_if": {"operator": "AND", "conditions": [
                    {"value_left": "=inpName", "comparator": "!==", "value_right": ""}
                ]}
            },
            {
                "widget_type": "Button",
                "id": "btnSave",
                "disabled_if": {"operator": "OR", "conditions": [
                    {"value_left": "=inpName", "comparator": "==", "value_right": ""},
                    {"value_left": "=inpName", "comparator": "==", "value_right": "?"}
                ]}
            },
            {"widget_type": "Display", "id": "dspEcho", "value": "=inpName"}
        ]
    })
}

#[test]
fn should_run_all_handlers_of_an_event_in_one_dispatch_method_in_order() {
    let tree = WidgetTree::from_json_value(page_with_three_dependents()).unwrap();
    let config = CompilerConfig::default();
    let model = PrefillModel::new();
    let translator = StaticTranslator::with_defaults();
    let registry = ElementRegistry::default();
    let mut ctx = CompilationContext::new(
        &tree,
        &config,
        &model,
        &PromiseServerAdapter,
        &translator,
        &registry,
    );
    let content = ctx.compile_node(tree.root()).unwrap();

    assert_eq!(
        ctx.controller().event_handlers("inpName", "change"),
        &[
            "oController.applyHiddenIfDspHint();".to_string(),
            "oController.applyDisabledIfBtnSave();".to_string(),
            "oController.syncValueDspEcho();".to_string(),
        ]
    );
    assert_eq!(content.matches("[oController.onChangeInpName, oController]").count(), 1);

    let source = ctx.controller().render();
    assert_eq!(source.matches("onChangeInpName: function (oEvent) {").count(), 1);
    assert_eq!(source.matches(CANCELLED_GUARD).count(), 2);
    let handler = &source[source.find("onChangeInpName: function").unwrap()..];
    let hidden = handler.find("oController.applyHiddenIfDspHint();").unwrap();
    let disabled = handler.find("oController.applyDisabledIfBtnSave();").unwrap();
    let echo = handler.find("oController.syncValueDspEcho();").unwrap();
    assert!(hidden < disabled && disabled < echo);
}

#[test]
fn should_subscribe_once_per_dependency_and_effect() {
    let tree = WidgetTree::from_json_value(page_with_three_dependents()).unwrap();
    let config = CompilerConfig::default();
    let model = PrefillModel::new();
    let translator = StaticTranslator::with_defaults();
    let registry = ElementRegistry::default();
    let mut ctx = CompilationContext::new(
        &tree,
        &config,
        &model,
        &PromiseServerAdapter,
        &translator,
        &registry,
    );
    ctx.compile_node(tree.root()).unwrap();

    let handlers = ctx.controller().event_handlers("inpName", "change");
    let save = handlers
        .iter()
        .filter(|s| s.as_str() == "oController.applyDisabledIfBtnSave();")
        .count();
    assert_eq!(save, 1);
}

#[test]
fn should_evaluate_effects_on_init_and_after_prefill() {
    let tree = WidgetTree::from_json_value(page_with_three_dependents()).unwrap();
    let config = CompilerConfig::default();
    let model = PrefillModel::new();
    let translator = StaticTranslator::with_defaults();
    let registry = ElementRegistry::default();
    let mut ctx = CompilationContext::new(
        &tree,
        &config,
        &model,
        &PromiseServerAdapter,
        &translator,
        &registry,
    );
    ctx.compile_node(tree.root()).unwrap();

    let controller = ctx.controller();
    let on_init = controller.lifecycle_scripts(LifecyclePhase::OnInit);
    assert!(on_init.contains(&"oController.applyDisabledIfBtnSave();".to_string()));
    assert!(on_init.contains(&"oController.syncValueDspEcho();".to_string()));
    let after_prefill = controller.lifecycle_scripts(LifecyclePhase::OnPrefillDataChanged);
    assert_eq!(
        after_prefill
            .iter()
            .filter(|s| s.as_str() == "oController.applyHiddenIfDspHint();")
            .count(),
        1
    );
}

#[test]
fn should_attach_handlers_of_controls_without_inline_dispatch_from_on_init() {
    let page = json!({
        "widget_type": "Panel",
        "id": "pnlMain",
        "widgets": [
            {"widget_type": "Display", "id": "dspTotal"},
            {
                "widget_type": "Input",
                "id": "inpDiscount",
                "hidden_if": {"conditions": [
                    {"value_left": "=dspTotal", "comparator": "<", "value_right": 100}
                ]}
            }
        ]
    });
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap();
    let controller = &output.root().unwrap().controller;
    assert!(!controller.contains("onChangeDspTotal"));
    assert!(controller.contains("oController.byId('dspTotal').getText() < 100"));
}

#[test]
fn should_keep_one_controller_per_view() {
    let page = json!({
        "widget_type": "Panel",
        "id": "pnlMain",
        "widgets": [
            {"widget_type": "Input", "id": "inpCustomer"},
            {"widget_type": "Button", "id": "btnEdit", "open_dialog": "dlgEdit"},
            {"widget_type": "Dialog", "id": "dlgEdit", "widgets": [
                {
                    "widget_type": "Input",
                    "id": "inpNote",
                    "required_if": {"conditions": [
                        {"value_left": "=inpCustomer", "comparator": "=", "value_right": "vip"}
                    ]}
                },
                {"widget_type": "Button", "id": "btnClose", "close_dialog": true}
            ]}
        ]
    });
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap();
    assert_eq!(output.views.len(), 2);

    let page_view = output.view("pnlMain").unwrap();
    let dialog_view = output.view("dlgEdit").unwrap();
    assert!(page_view.controller.contains("oController.openView('dlgEdit');"));
    assert!(!page_view.controller.contains("applyRequiredIfInpNote"));
    assert!(dialog_view.controller.contains("applyRequiredIfInpNote: function ()"));
    assert!(dialog_view.controller.contains("oController.closeView();"));
    // the page's input is attached from the dialog's own onInit
    assert!(dialog_view.controller.contains(
        "oController.byId('inpCustomer').attachEvent('change', oController.onChangeInpCustomer, oController);"
    ));
    assert!(!page_view.content.contains("inpNote"));
}
