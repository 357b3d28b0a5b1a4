//! Condition Engine Tests
//!
//! Predicate compilation, dependency collection and per-row effects.

use std::rc::Rc;

use serde_json::json;
use widget_compiler::conditions::{
    compile_predicate, Comparator, ConditionGroup, Expression, LogicalOperator,
};
use widget_compiler::context::CompilationContext;
use widget_compiler::elements::{Element, ElementRegistry};
use widget_compiler::link::{Dependency, WidgetLink};
use widget_compiler::server::PromiseServerAdapter;
use widget_compiler::translation::StaticTranslator;
use widget_compiler::widget::{LiteralValue, NodeIndex};
use widget_compiler::{CompileError, CompilerConfig, PrefillModel, WidgetCompiler, WidgetKind, WidgetTree};

fn link(text: &str) -> Expression {
    Expression::WidgetReference(WidgetLink::parse(text).unwrap())
}

fn text(value: &str) -> Expression {
    Expression::Literal(LiteralValue::String(value.to_string()))
}

fn form() -> WidgetTree {
    WidgetTree::from_json_value(json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpA"},
            {"widget_type": "Input", "id": "inpB"},
            {"widget_type": "Input", "id": "inpBound", "attribute_alias": "AMOUNT"},
            {"widget_type": "Button", "id": "btnSave"}
        ]
    }))
    .unwrap()
}

#[test]
fn should_collect_every_dependency_of_nested_groups() {
    let tree = form();
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

    let group = ConditionGroup::new(LogicalOperator::And)
        .with_condition(link("=inpA"), Comparator::Equals, text("x"))
        .with_group(
            ConditionGroup::new(LogicalOperator::Or)
                .with_condition(link("=inpB"), Comparator::NotEquals, text("y"))
                .with_condition(link("=inpBound"), Comparator::Greater, Expression::ModelPath("/limits/max".into()))
                .with_condition(link("=~input!STATUS"), Comparator::Equals, text("open")),
        );
    let origin = tree.find("btnSave").unwrap();
    let predicate = compile_predicate(&mut ctx, origin, &group, None).unwrap();

    assert_eq!(
        predicate.code,
        "oController.byId('inpA').getValue() == 'x' && (\
         oController.byId('inpB').getValue() != 'y' || \
         oModel.getProperty('/AMOUNT') > oModel.getProperty('/limits/max') || \
         oModel.getProperty('/_context/STATUS') == 'open')"
    );
    let expected = [
        Dependency::event("inpA", "change"),
        Dependency::event("inpB", "change"),
        Dependency::ModelPath("/AMOUNT".to_string()),
        Dependency::ModelPath("/limits/max".to_string()),
        Dependency::ModelPath("/_context/STATUS".to_string()),
    ];
    assert_eq!(predicate.dependencies.len(), expected.len());
    for dependency in &expected {
        assert!(predicate.dependencies.contains(dependency), "missing {:?}", dependency);
    }
    assert!(!predicate.depends_on_table);
}

#[test]
fn should_compile_empty_groups_to_their_identity() {
    let tree = form();
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
    let origin = tree.find("btnSave").unwrap();

    let and = compile_predicate(&mut ctx, origin, &ConditionGroup::new(LogicalOperator::And), None).unwrap();
    let or = compile_predicate(&mut ctx, origin, &ConditionGroup::new(LogicalOperator::Or), None).unwrap();
    assert_eq!(and.code, "true");
    assert_eq!(or.code, "false");
    assert!(and.dependencies.is_empty());
}

fn orders_table(disabled_if_left: &str) -> serde_json::Value {
    json!({
        "widget_type": "Panel",
        "id": "pnlOrders",
        "widgets": [{
            "widget_type": "DataTable",
            "id": "dtOrders",
            "columns": [
                {"widget_type": "DataColumn", "id": "colStatus", "attribute_alias": "STATUS"},
                {
                    "widget_type": "DataColumn",
                    "id": "colAmount",
                    "attribute_alias": "AMOUNT",
                    "disabled_if": {"conditions": [
                        {"value_left": disabled_if_left, "comparator": "==", "value_right": "closed"}
                    ]}
                }
            ]
        }]
    })
}

#[test]
fn should_read_row_local_values_for_references_to_the_own_table() {
    for left in ["=dtOrders!STATUS", "=colStatus"] {
        let output = WidgetCompiler::new(CompilerConfig::default())
            .compile_json_str(&orders_table(left).to_string())
            .unwrap();
        let controller = &output.root().unwrap().controller;

        assert!(controller.contains("if (oRow['STATUS'] == 'closed') {"), "{}", left);
        assert!(controller.contains("oTable.setCellEnabled(iRowIdx, 'AMOUNT', false);"));
        assert!(controller.contains("oTable.setCellEnabled(iRowIdx, 'AMOUNT', true);"));
        assert!(controller.contains("aRows.forEach(function (oRow, iRowIdx) {"));
        assert!(controller.contains("oTable.setSelectedIndex(iPrevSelected);"));
        assert!(!controller.contains("getSelectedRowData"));
    }
}

#[test]
fn should_reapply_row_effects_when_rows_are_updated() {
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&orders_table("=colStatus").to_string())
        .unwrap();
    let view = output.root().unwrap();

    assert!(view.content.contains("rowsUpdated: [oController.onRowsUpdatedDtOrders, oController]"));
    let handler = &view.controller[view.controller.find("onRowsUpdatedDtOrders: function").unwrap()..];
    assert!(handler.contains("oController.applyDisabledIfColAmount();"));
}

#[test]
fn should_reject_unknown_comparators_with_the_widget_id() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpA"},
            {"widget_type": "Button", "id": "btnSave", "disabled_if": {"conditions": [
                {"value_left": "=inpA", "comparator": "~~", "value_right": "x"}
            ]}}
        ]
    });
    let err = WidgetTree::from_json_value(page).unwrap_err();
    assert!(matches!(err, CompileError::Condition { .. }));
    assert_eq!(err.widget_id(), Some("btnSave"));
}

#[test]
fn should_reject_unknown_operators() {
    let page = json!({
        "widget_type": "Button",
        "id": "btnSave",
        "hidden_if": {"operator": "XOR", "conditions": []}
    });
    let err = WidgetTree::from_json_value(page).unwrap_err();
    assert!(matches!(err, CompileError::Condition { .. }));
}

#[test]
fn should_expand_literal_lists_for_in_comparisons() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpCity"},
            {"widget_type": "Input", "id": "inpZip", "hidden_if": {"conditions": [
                {"value_left": "=inpCity", "comparator": "[", "value_right": "Berlin,Hamburg"}
            ]}}
        ]
    });
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap();
    let controller = &output.root().unwrap().controller;
    assert!(controller.contains(
        "['Berlin', 'Hamburg'].indexOf((oController.byId('inpCity').getValue() == null ? '' : String(oController.byId('inpCity').getValue()))) !== -1"
    ));
}

#[test]
fn should_follow_the_link_of_a_display_read_by_a_condition() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpName"},
            {"widget_type": "Display", "id": "dspName", "value": "=inpName"},
            {"widget_type": "Button", "id": "btnSave", "disabled_if": {"conditions": [
                {"value_left": "=dspName", "comparator": "==", "value_right": ""}
            ]}}
        ]
    });
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap();
    let controller = &output.root().unwrap().controller;

    assert!(controller.contains("if (oController.byId('dspName').getText() == '') {"));
    let handler = &controller[controller.find("onChangeInpName: function").unwrap()..];
    let sync = handler.find("oController.syncValueDspName();").unwrap();
    let apply = handler.find("oController.applyDisabledIfBtnSave();").unwrap();
    assert!(sync < apply);
}

#[test]
fn should_subscribe_to_the_model_path_shown_by_a_display() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Display", "id": "dspTotal", "value": "=/order/total"},
            {"widget_type": "Button", "id": "btnPay", "disabled_if": {"conditions": [
                {"value_left": "=dspTotal", "comparator": "==", "value_right": 0}
            ]}}
        ]
    });
    let output = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap();
    let view = output.root().unwrap();

    assert!(view.content.contains("text: {path: '/order/total'"));
    assert!(view
        .controller
        .contains("if (oModel.getProperty('/order/total') == 0) {"));
    let attach = view
        .controller
        .find("oModel.bindProperty('/order/total').attachChange(function () {")
        .unwrap();
    assert!(view.controller[attach..].contains("oController.applyDisabledIfBtnPay();"));
}

#[test]
fn should_reject_display_links_leading_back_to_themselves() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Display", "id": "dspA", "value": "=dspB"},
            {"widget_type": "Display", "id": "dspB", "value": "=dspA"}
        ]
    });
    let err = WidgetCompiler::new(CompilerConfig::default())
        .compile_json_str(&page.to_string())
        .unwrap_err();
    assert!(matches!(err, CompileError::Configuration { .. }));
    assert!(err.to_string().contains("leads back to this widget"));
}

struct PlainLabel {
    index: NodeIndex,
}

impl Element for PlainLabel {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, _ctx: &mut CompilationContext) -> widget_compiler::Result<String> {
        Ok(String::new())
    }

    fn change_event(&self) -> Option<&'static str> {
        None
    }
}

fn plain_label(_: WidgetKind, index: NodeIndex) -> Rc<dyn Element> {
    Rc::new(PlainLabel { index })
}

#[test]
fn should_reject_conditions_on_widgets_without_change_events() {
    let page = json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Display", "id": "dspNote"},
            {"widget_type": "Button", "id": "btnSave", "hidden_if": {"conditions": [
                {"value_left": "=dspNote", "comparator": "==", "value_right": "x"}
            ]}}
        ]
    });
    let mut compiler = WidgetCompiler::new(CompilerConfig::default());
    compiler.registry_mut().register(WidgetKind::Display, plain_label);
    let err = compiler.compile_json_str(&page.to_string()).unwrap_err();

    assert!(matches!(err, CompileError::Configuration { .. }));
    assert_eq!(err.widget_id(), Some("dspNote"));
}
