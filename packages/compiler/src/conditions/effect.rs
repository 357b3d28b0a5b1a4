//! Conditional Effects
//!
//! Wraps a compiled predicate into a controller method that applies the true or
//! false branch, subscribes that method to every dependency of the predicate
//! and runs it once when the view initializes and whenever prefill data changes.

use crate::conditions::predicate::{compile_predicate, Predicate, RowContext};
use crate::conditions::{ConditionGroup, ConditionalProperty};
use crate::context::CompilationContext;
use crate::controller::LifecyclePhase;
use crate::error::{InWidget, Result};
use crate::link::Dependency;
use crate::output::js::{self, CONTROLLER_VAR};
use crate::output::CodeWriter;
use crate::widget::NodeIndex;

/// Event fired by data widgets after their rows were (re)rendered.
pub const ROWS_UPDATED_EVENT: &str = "rowsUpdated";

#[derive(Debug, Clone)]
pub struct Effect {
    /// Controller method applying the effect.
    pub method: String,
    /// Statement invoking the method.
    pub script: String,
    pub predicate: Predicate,
}

#[derive(Debug, Clone)]
pub struct RowEffect {
    pub method: String,
    pub script: String,
    pub predicate: Predicate,
    /// The predicate reads the row's own table, so every row is made current
    /// while the effect runs.
    pub depends_on_table: bool,
}

pub fn compile_effect(
    ctx: &mut CompilationContext,
    origin: NodeIndex,
    property: ConditionalProperty,
    group: &ConditionGroup,
    apply_true: &str,
    apply_false: &str,
) -> Result<Effect> {
    let tree = ctx.tree;
    let node = tree.node(origin);
    let predicate = compile_predicate(ctx, origin, group, None)?;
    let method = js::member_name(property.member_prefix(), &node.id);
    let body = branch(&predicate.code, apply_true, apply_false);

    ctx.controller().add_method(&method, "", &body).in_widget(node)?;
    for dependency in &predicate.dependencies {
        ctx.subscribe(origin, dependency, &method)?;
    }

    let script = call(&method);
    let controller = ctx.controller();
    controller.add_lifecycle_script(LifecyclePhase::OnInit, &script, false);
    controller.add_lifecycle_script(LifecyclePhase::OnPrefillDataChanged, &script, false);

    Ok(Effect {
        method,
        script,
        predicate,
    })
}

/// Per-row variant: the effect is applied to every row of `row.table` whenever
/// its rows are rendered or any outside dependency changes.
pub fn compile_row_effect(
    ctx: &mut CompilationContext,
    origin: NodeIndex,
    property: ConditionalProperty,
    group: &ConditionGroup,
    row: &RowContext,
    apply_true: &str,
    apply_false: &str,
) -> Result<RowEffect> {
    let tree = ctx.tree;
    let node = tree.node(origin);
    let table = tree.node(row.table);
    let predicate = compile_predicate(ctx, origin, group, Some(row))?;
    let rows_path = ctx.resolve_binding(row.table, "rows").path;

    let method = js::member_name(property.member_prefix(), &node.id);
    let body = wrap_row_iteration(
        &table.id,
        &rows_path,
        row,
        predicate.depends_on_table,
        &branch(&predicate.code, apply_true, apply_false),
    );
    ctx.controller().add_method(&method, "", &body).in_widget(node)?;

    ctx.subscribe(origin, &Dependency::event(&table.id, ROWS_UPDATED_EVENT), &method)?;
    for dependency in &predicate.dependencies {
        ctx.subscribe(origin, dependency, &method)?;
    }

    Ok(RowEffect {
        script: call(&method),
        method,
        depends_on_table: predicate.depends_on_table,
        predicate,
    })
}

/// Runs `body` once per row of the table. With `select_rows`, each row is made
/// the table's current row before `body` runs and the previous selection is
/// restored afterwards, since control getters read "the current row".
pub fn wrap_row_iteration(
    table_id: &str,
    rows_path: &str,
    row: &RowContext,
    select_rows: bool,
    body: &str,
) -> String {
    let mut w = CodeWriter::new();
    w.println(&format!("var oTable = {};", js::control_by_id(table_id)));
    w.block("if (!oTable) {", "}", |w| w.println("return;"));
    w.println(&format!("var aRows = {} || [];", js::model_read(rows_path)));
    if select_rows {
        w.println("var iPrevSelected = oTable.getSelectedIndex();");
    }
    w.println(&format!(
        "aRows.forEach(function ({}, {}) {{",
        row.row_expr, row.index_expr
    ));
    w.inc_indent();
    if select_rows {
        w.println(&format!("oTable.setSelectedIndex({});", row.index_expr));
    }
    w.print_block(body);
    w.dec_indent();
    w.println("});");
    if select_rows {
        w.println("oTable.setSelectedIndex(iPrevSelected);");
    }
    w.to_source()
}

fn branch(condition: &str, apply_true: &str, apply_false: &str) -> String {
    let mut w = CodeWriter::new();
    w.println(&format!("if ({}) {{", condition));
    w.inc_indent();
    w.print_block(apply_true);
    w.dec_indent();
    w.println("} else {");
    w.inc_indent();
    w.print_block(apply_false);
    w.dec_indent();
    w.println("}");
    w.to_source()
}

fn call(method: &str) -> String {
    format!("{}.{}();", CONTROLLER_VAR, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_restore_selection_only_when_rows_are_selected() {
        let row = RowContext::new(NodeIndex::new(1));
        let plain = wrap_row_iteration("dt", "/dt", &row, false, "x();");
        assert!(!plain.contains("setSelectedIndex"));

        let selecting = wrap_row_iteration("dt", "/dt", &row, true, "x();");
        let save = selecting.find("var iPrevSelected = oTable.getSelectedIndex();").unwrap();
        let select = selecting.find("oTable.setSelectedIndex(iRowIdx);").unwrap();
        let body = selecting.find("x();").unwrap();
        let restore = selecting.find("oTable.setSelectedIndex(iPrevSelected);").unwrap();
        assert!(save < select && select < body && body < restore);
    }
}
