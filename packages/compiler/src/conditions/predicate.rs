//! Predicate Compilation
//!
//! Compiles a condition group into a side-effect free JavaScript expression and
//! collects everything the expression reads, so callers can subscribe to it.

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::conditions::{Comparator, Condition, ConditionGroup, Expression};
use crate::context::CompilationContext;
use crate::error::Result;
use crate::link::{resolve_link, Dependency, WidgetLink};
use crate::output::js;
use crate::widget::{LiteralValue, NodeIndex, WidgetKind};

/// Evaluation once per row of a data widget instead of once per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContext {
    pub table: NodeIndex,
    /// Expression holding the current row object, e.g. `oRow`.
    pub row_expr: String,
    /// Expression holding the current row index, e.g. `iRowIdx`.
    pub index_expr: String,
}

impl RowContext {
    pub fn new(table: NodeIndex) -> Self {
        RowContext {
            table,
            row_expr: "oRow".to_string(),
            index_expr: "iRowIdx".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub code: String,
    /// Model paths and control events the predicate reads, without duplicates.
    pub dependencies: IndexSet<Dependency>,
    /// Reads columns of the row's own table.
    pub depends_on_table: bool,
}

pub fn compile_predicate(
    ctx: &mut CompilationContext,
    origin: NodeIndex,
    group: &ConditionGroup,
    row: Option<&RowContext>,
) -> Result<Predicate> {
    let mut compiler = PredicateCompiler {
        origin,
        row,
        dependencies: IndexSet::new(),
        depends_on_table: false,
    };
    let code = compiler.group(ctx, group)?;
    Ok(Predicate {
        code,
        dependencies: compiler.dependencies,
        depends_on_table: compiler.depends_on_table,
    })
}

struct PredicateCompiler<'r> {
    origin: NodeIndex,
    row: Option<&'r RowContext>,
    dependencies: IndexSet<Dependency>,
    depends_on_table: bool,
}

impl PredicateCompiler<'_> {
    fn group(&mut self, ctx: &mut CompilationContext, group: &ConditionGroup) -> Result<String> {
        let mut parts: SmallVec<[String; 4]> = SmallVec::new();
        for condition in &group.conditions {
            parts.push(self.condition(ctx, condition)?);
        }
        for nested in &group.nested_groups {
            parts.push(format!("({})", self.group(ctx, nested)?));
        }
        if parts.is_empty() {
            return Ok(group.operator.identity().to_string());
        }
        Ok(parts.join(group.operator.js_operator()))
    }

    fn condition(&mut self, ctx: &mut CompilationContext, condition: &Condition) -> Result<String> {
        let left = self.expression(ctx, &condition.left)?;
        let right = self.expression(ctx, &condition.right)?;
        Ok(compare(&left, condition.comparator, &right, &condition.right))
    }

    fn expression(&mut self, ctx: &mut CompilationContext, expression: &Expression) -> Result<String> {
        match expression {
            Expression::Literal(literal) => Ok(literal.to_js()),
            Expression::ModelPath(path) => {
                self.dependencies.insert(Dependency::ModelPath(path.clone()));
                Ok(js::model_read(path))
            }
            Expression::WidgetReference(link) => {
                if let Some(row) = self.row {
                    if let Some(column) = row_local_column(ctx, link, row) {
                        self.depends_on_table = true;
                        return Ok(format!("{}[{}]", row.row_expr, js::quote(&column)));
                    }
                }
                let resolved = resolve_link(ctx, link, self.origin)?;
                if let Some(dependency) = resolved.dependency.clone() {
                    self.dependencies.insert(dependency);
                }
                Ok(resolved.getter().to_string())
            }
        }
    }
}

/// Data key of a link into the row's own table: `=table!column` or a link to
/// one of the table's columns.
fn row_local_column(
    ctx: &mut CompilationContext,
    link: &WidgetLink,
    row: &RowContext,
) -> Option<String> {
    if link.page.is_some() {
        return None;
    }
    let tree = ctx.tree;
    let target = tree.find(link.target_id()?)?;
    if target == row.table {
        let column = link.column.as_deref()?;
        let element = ctx.element(target).ok()?;
        return element.resolve_column(ctx, column);
    }
    let node = tree.node(target);
    if node.kind == WidgetKind::DataColumn && node.parent == Some(row.table) && link.column.is_none() {
        return node.column_name.clone();
    }
    None
}

fn as_string(expr: &str) -> String {
    format!("({} == null ? '' : String({}))", expr, expr)
}

fn compare(left: &str, comparator: Comparator, right: &str, right_expr: &Expression) -> String {
    match comparator {
        Comparator::Equals => format!("{} == {}", left, right),
        Comparator::NotEquals => format!("{} != {}", left, right),
        Comparator::Is | Comparator::IsNot => format!(
            "{}.toLowerCase().indexOf({}.toLowerCase()) {} -1",
            as_string(left),
            as_string(right),
            if comparator == Comparator::Is { "!==" } else { "===" }
        ),
        Comparator::Less => format!("{} < {}", left, right),
        Comparator::LessOrEqual => format!("{} <= {}", left, right),
        Comparator::Greater => format!("{} > {}", left, right),
        Comparator::GreaterOrEqual => format!("{} >= {}", left, right),
        Comparator::In | Comparator::NotIn => {
            let list = match right_expr {
                Expression::Literal(LiteralValue::String(items)) => format!(
                    "[{}]",
                    items
                        .split(',')
                        .map(|item| js::quote(item.trim()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                _ => format!("{}.split(',')", as_string(right)),
            };
            format!(
                "{}.indexOf({}) {} -1",
                list,
                as_string(left),
                if comparator == Comparator::In { "!==" } else { "===" }
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Expression {
        Expression::Literal(LiteralValue::String(s.into()))
    }

    #[test]
    fn should_compile_contains_case_insensitive() {
        let code = compare("a", Comparator::Is, "'x'", &lit("x"));
        assert_eq!(
            code,
            "(a == null ? '' : String(a)).toLowerCase().indexOf(('x' == null ? '' : String('x')).toLowerCase()) !== -1"
        );
    }

    #[test]
    fn should_expand_literal_lists() {
        let code = compare("a", Comparator::NotIn, "'A, B'", &lit("A, B"));
        assert_eq!(code, "['A', 'B'].indexOf((a == null ? '' : String(a))) === -1");
    }
}
