//! Binding Resolver Tests
//!
//! Static-vs-bound decisions, conflict fallback and model registrations.

use serde_json::json;
use widget_compiler::binding::{BindingOverrides, BindingResolver};
use widget_compiler::context::CompilationContext;
use widget_compiler::elements::ElementRegistry;
use widget_compiler::server::PromiseServerAdapter;
use widget_compiler::translation::StaticTranslator;
use widget_compiler::{BindingConflictPolicy, CompilerConfig, PrefillModel, WidgetTree};

fn tree(value: serde_json::Value) -> WidgetTree {
    WidgetTree::from_json_value(value).unwrap()
}

fn two_inputs_on_same_column() -> WidgetTree {
    tree(json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Input", "id": "inpFirst", "attribute_alias": "NAME"},
            {"widget_type": "Input", "id": "inpSecond", "attribute_alias": "NAME"}
        ]
    }))
}

#[test]
fn should_return_identical_decisions_when_resolving_twice() {
    let tree = two_inputs_on_same_column();
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::new(BindingConflictPolicy::FallbackToStatic);
    let input = tree.find("inpFirst").unwrap();
    let overrides = BindingOverrides::default();

    let first = resolver.resolve(&tree, &model, input, "value", &overrides, "/");
    let second = resolver.resolve(&tree, &model, input, "value", &overrides, "/");
    assert_eq!(first, second);
    assert!(first.is_bound);
    assert_eq!(first.path, "/NAME");
}

#[test]
fn should_fall_back_to_static_for_the_second_widget_on_a_path() {
    let tree = two_inputs_on_same_column();
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::new(BindingConflictPolicy::FallbackToStatic);
    let overrides = BindingOverrides::default();
    let first = tree.find("inpFirst").unwrap();
    let second = tree.find("inpSecond").unwrap();

    let first_decision = resolver.resolve(&tree, &model, first, "value", &overrides, "/");
    let second_decision = resolver.resolve(&tree, &model, second, "value", &overrides, "/");
    assert!(first_decision.is_bound);
    assert!(!second_decision.is_bound);
    assert_eq!(second_decision.path, "");
    assert_eq!(resolver.owner_of("/NAME"), Some(first));

    // the owner keeps its binding when asked again
    let again = resolver.resolve(&tree, &model, first, "value", &overrides, "/");
    assert!(again.is_bound);
}

#[test]
fn should_share_paths_when_policy_allows_it() {
    let tree = two_inputs_on_same_column();
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::new(BindingConflictPolicy::Share);
    let overrides = BindingOverrides::default();

    for id in ["inpFirst", "inpSecond"] {
        let decision = resolver.resolve(&tree, &model, tree.find(id).unwrap(), "value", &overrides, "/");
        assert!(decision.is_bound, "{} should be bound", id);
        assert_eq!(decision.path, "/NAME");
    }
}

#[test]
fn should_keep_widgets_without_column_static() {
    let tree = tree(json!({"widget_type": "Input", "id": "inpFree"}));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::default();
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &BindingOverrides::default(), "/");
    assert!(!decision.is_bound);
    assert!(decision.binding_expression().is_none());
}

#[test]
fn should_keep_literal_values_static() {
    let tree = tree(json!({
        "widget_type": "Input",
        "id": "inpCountry",
        "attribute_alias": "COUNTRY",
        "value": "DE"
    }));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::default();
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &BindingOverrides::default(), "/");
    assert!(!decision.is_bound);
}

#[test]
fn should_prefer_model_registrations_over_literals_and_opt_outs() {
    let tree = tree(json!({
        "widget_type": "Input",
        "id": "inpCountry",
        "attribute_alias": "COUNTRY",
        "value": "DE"
    }));
    let mut model = PrefillModel::new();
    model.register("inpCountry", "value", "/_context/COUNTRY");
    let mut resolver = BindingResolver::default();
    let overrides = BindingOverrides {
        force_bound: None,
        binding_disabled: true,
    };
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &overrides, "/");
    assert!(decision.is_bound);
    assert_eq!(decision.path, "/_context/COUNTRY");
}

#[test]
fn should_honor_forced_overrides_verbatim() {
    let tree = tree(json!({"widget_type": "Input", "id": "inpName", "attribute_alias": "NAME"}));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::default();

    let unbound = BindingOverrides {
        force_bound: Some(false),
        binding_disabled: false,
    };
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &unbound, "/");
    assert!(!decision.is_bound);

    let mut resolver = BindingResolver::default();
    let disabled = BindingOverrides {
        force_bound: None,
        binding_disabled: true,
    };
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &disabled, "/");
    assert!(!decision.is_bound);
}

#[test]
fn should_bind_cell_templates_relative_without_claiming_paths() {
    let tree = tree(json!({
        "widget_type": "Panel",
        "id": "pnlMain",
        "widgets": [
            {"widget_type": "DataTable", "id": "dtOrders", "columns": [
                {"widget_type": "DataColumn", "id": "colStatus", "attribute_alias": "STATUS"}
            ]},
            {"widget_type": "Input", "id": "inpStatus", "attribute_alias": "STATUS"}
        ]
    }));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::default();
    let overrides = BindingOverrides::default();

    let cell = resolver.resolve(&tree, &model, tree.find("colStatus").unwrap(), "text", &overrides, "");
    assert!(cell.is_bound);
    assert_eq!(cell.path, "STATUS");
    assert!(!cell.is_absolute());
    assert_eq!(resolver.owner_of("STATUS"), None);

    let input = resolver.resolve(&tree, &model, tree.find("inpStatus").unwrap(), "value", &overrides, "/");
    assert!(input.is_bound);
    assert_eq!(input.path, "/STATUS");
}

#[test]
fn should_render_formatted_binding_expressions() {
    let tree = tree(json!({
        "widget_type": "Input",
        "id": "inpDue",
        "attribute_alias": "DUE_DATE",
        "data_type": "date"
    }));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::default();
    let decision = resolver.resolve(&tree, &model, tree.root(), "value", &BindingOverrides::default(), "/orders");
    assert_eq!(
        decision.binding_expression().unwrap(),
        "{path: '/orders/DUE_DATE', type: 'Date', formatOptions: {source: {pattern: 'yyyy-MM-dd'}}}"
    );
}

#[test]
fn should_apply_element_overrides_set_after_a_first_resolution() {
    let tree = two_inputs_on_same_column();
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
    let first = tree.find("inpFirst").unwrap();
    let second = tree.find("inpSecond").unwrap();

    assert_eq!(ctx.resolve_binding(first, "value").path, "/NAME");
    ctx.disable_binding(first);
    assert!(!ctx.resolve_binding(first, "value").is_bound);
    // the released path is free for the next widget
    assert_eq!(ctx.resolve_binding(second, "value").path, "/NAME");

    ctx.set_binding_prefix(first, "/draft");
    assert!(!ctx.resolve_binding(first, "value").is_bound);
    ctx.set_force_bound(first, true);
    assert_eq!(ctx.resolve_binding(first, "value").path, "/draft/NAME");
}

#[test]
fn should_bind_values_written_as_model_paths() {
    let tree = tree(json!({
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [
            {"widget_type": "Display", "id": "dspTotal", "value": "=/order/TOTAL"},
            {"widget_type": "Input", "id": "inpTotal", "attribute_alias": "TOTAL"}
        ]
    }));
    let model = PrefillModel::new();
    let mut resolver = BindingResolver::new(BindingConflictPolicy::FallbackToStatic);
    let overrides = BindingOverrides::default();
    let display = tree.find("dspTotal").unwrap();
    let input = tree.find("inpTotal").unwrap();

    let decision = resolver.resolve(&tree, &model, display, "text", &overrides, "/");
    assert!(decision.is_bound);
    assert_eq!(decision.path, "/order/TOTAL");
    assert_eq!(resolver.owner_of("/order/TOTAL"), Some(display));

    // the claimed path takes part in conflict detection
    let conflicting = resolver.resolve(&tree, &model, input, "value", &overrides, "/order");
    assert!(!conflicting.is_bound);
}
