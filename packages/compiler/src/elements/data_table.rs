//! Data Tables
//!
//! A table is always bound: its rows live at `/<column or id>` and are loaded
//! lazily through the server adapter, one page at a time. Columns are cell
//! templates bound relative to their row. Links to `=table!COLUMN` read the
//! selected row.

use log::debug;

use crate::conditions::{compile_row_effect, ConditionalProperty, RowContext, ROWS_UPDATED_EVENT};
use crate::context::CompilationContext;
use crate::controller::LifecyclePhase;
use crate::elements::{array_literal, compile_conditional_properties, ControlBuilder, Element};
use crate::error::{CompileError, InWidget, Result};
use crate::link::Dependency;
use crate::output::js::{self, CONTROLLER_VAR};
use crate::output::CodeWriter;
use crate::server::ServerRequest;
use crate::translation;
use crate::widget::{NodeIndex, WidgetKind, WidgetNode};

pub const SELECTION_CHANGE_EVENT: &str = "selectionChange";
const ROWS_PROPERTY: &str = "rows";

pub struct DataTable {
    index: NodeIndex,
}

impl DataTable {
    pub fn new(index: NodeIndex) -> Self {
        DataTable { index }
    }

    fn paginator_name(node: &WidgetNode) -> String {
        js::member_name("paginator", &node.id)
    }

    /// Registers `load<Id>`, which fetches the current page into the rows path.
    fn compile_loader(
        &self,
        ctx: &mut CompilationContext,
        node: &WidgetNode,
        action: &str,
        rows_path: &str,
    ) -> Result<()> {
        let paginator = ctx
            .controller()
            .property_accessor(&Self::paginator_name(node))
            .in_widget(node)?;
        let error_text = ctx.translate(translation::ACTION_FAILED);
        let request = ctx.server.build_request(&ServerRequest {
            action,
            result_sink: Some(rows_path),
            params: "{page: oPaginator.page, pageSize: oPaginator.pageSize}",
            on_success: "oTable.setBusy(false);",
            on_error: &format!(
                "oTable.setBusy(false);\n{}.showError(oError, {});",
                CONTROLLER_VAR,
                js::quote(&error_text)
            ),
        });

        let mut w = CodeWriter::new();
        w.println(&format!("var oTable = {};", js::control_by_id(&node.id)));
        w.block("if (!oTable) {", "}", |w| w.println("return;"));
        w.println(&format!("var oPaginator = {};", paginator));
        w.println("oTable.setBusy(true);");
        w.print_block(&request);

        let method = js::member_name("load", &node.id);
        let controller = ctx.controller();
        controller
            .add_method(&method, "", &w.to_source())
            .in_widget(node)?;
        controller.add_lifecycle_script(
            LifecyclePhase::OnShowView,
            &format!("{}.{}();", CONTROLLER_VAR, method),
            false,
        );
        Ok(())
    }

    fn column_children<'t>(&self, ctx: &CompilationContext<'t>) -> impl Iterator<Item = &'t WidgetNode> {
        let tree = ctx.tree;
        tree.node(self.index)
            .children
            .iter()
            .map(move |child| tree.node(*child))
            .filter(|child| child.kind == WidgetKind::DataColumn)
    }
}

impl Element for DataTable {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);

        let rows_path = ctx.resolve_binding(self.index, ROWS_PROPERTY).path;
        debug!("data table \"{}\" reads its rows from {}", node.id, rows_path);

        let page_size = node.page_size.unwrap_or(ctx.config.default_page_size);
        ctx.controller()
            .add_property(
                &Self::paginator_name(node),
                &format!("{{page: 0, pageSize: {}}}", page_size),
            )
            .in_widget(node)?;

        let mut columns = Vec::new();
        let mut buttons = Vec::new();
        for child in &node.children {
            if tree.node(*child).kind == WidgetKind::DataColumn {
                columns.push(ctx.compile_node(*child)?);
            } else {
                buttons.push(ctx.compile_node(*child)?);
            }
        }

        if let Some(action) = &node.action {
            self.compile_loader(ctx, node, action, &rows_path)?;
        }
        compile_conditional_properties(ctx, self)?;

        let controller = ctx.controller();
        let selection = controller
            .build_event_dispatch_expression(&node.id, SELECTION_CHANGE_EVENT)
            .in_widget(node)?;
        let rows_updated = controller
            .build_event_dispatch_expression(&node.id, ROWS_UPDATED_EVENT)
            .in_widget(node)?;
        let no_data = ctx.translate(translation::NO_DATA);

        Ok(ControlBuilder::for_node(ctx, "Table", node)
            .optional_setting("title", node.caption.as_deref().map(js::quote))
            .setting(ROWS_PROPERTY, format!("{{path: {}}}", js::quote(&rows_path)))
            .setting("columns", array_literal(&columns))
            .setting_if(!buttons.is_empty(), "toolbar", array_literal(&buttons))
            .setting("noDataText", js::quote(&no_data))
            .setting(SELECTION_CHANGE_EVENT, selection)
            .setting(ROWS_UPDATED_EVENT, rows_updated)
            .render())
    }

    fn value_property(&self) -> &'static str {
        ROWS_PROPERTY
    }

    fn change_event(&self) -> Option<&'static str> {
        Some(SELECTION_CHANGE_EVENT)
    }

    fn build_js_value_getter(&self, ctx: &mut CompilationContext, column: Option<&str>) -> Result<String> {
        let control = js::control_by_id(&ctx.tree.node(self.index).id);
        Ok(match column {
            Some(column) => format!("({}.getSelectedRowData() || {{}})[{}]", control, js::quote(column)),
            None => format!("{}.getRows()", control),
        })
    }

    fn build_js_value_setter(
        &self,
        ctx: &mut CompilationContext,
        column: Option<&str>,
        value_js: &str,
    ) -> Result<Option<String>> {
        let rows_path = ctx.resolve_binding(self.index, ROWS_PROPERTY).path;
        let control = js::control_by_id(&ctx.tree.node(self.index).id);
        Ok(Some(match column {
            Some(column) => format!(
                "{}.setProperty({} + {}.getSelectedIndex() + {}, {})",
                js::MODEL_VAR,
                js::quote(&format!("{}/", rows_path.trim_end_matches('/'))),
                control,
                js::quote(&format!("/{}", column)),
                value_js
            ),
            None => js::model_write(&rows_path, value_js),
        }))
    }

    fn resolve_column(&self, ctx: &CompilationContext, column: &str) -> Option<String> {
        self.column_children(ctx)
            .find(|child| child.id == column || child.column_name.as_deref() == Some(column))
            .and_then(|child| child.column_name.clone())
    }

    fn build_js_set_required(&self, _ctx: &CompilationContext, _required: bool) -> String {
        String::new()
    }
}

/// Column of a data table. Compiles to a cell template bound relative to the
/// row; conditional properties are evaluated per row.
pub struct DataColumn {
    index: NodeIndex,
}

impl DataColumn {
    pub fn new(index: NodeIndex) -> Self {
        DataColumn { index }
    }

    fn table<'t>(&self, ctx: &CompilationContext<'t>) -> Result<&'t WidgetNode> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        node.parent
            .map(|parent| tree.node(parent))
            .filter(|parent| parent.kind == WidgetKind::DataTable)
            .ok_or_else(|| CompileError::configuration(node, "must be placed inside a data table"))
    }

    fn column_name<'t>(&self, ctx: &CompilationContext<'t>) -> Result<&'t str> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        node.column_name
            .as_deref()
            .ok_or_else(|| CompileError::configuration(node, "declares no data column"))
    }

    fn cell_call(column: &str, method: &str, flag: bool) -> String {
        format!(
            "oTable.{}(iRowIdx, {}, {});",
            method,
            js::quote(column),
            flag
        )
    }
}

impl Element for DataColumn {
    fn node(&self) -> NodeIndex {
        self.index
    }

    fn compile(&self, ctx: &mut CompilationContext) -> Result<String> {
        let tree = ctx.tree;
        let node = tree.node(self.index);
        let column = self.column_name(ctx)?;
        let table = self.table(ctx)?;

        let decision = ctx.resolve_binding(self.index, "text");
        let cell = ControlBuilder::new(ctx, "Text", None)
            .optional_setting("text", decision.binding_expression())
            .render();

        let row = RowContext::new(table.index);
        for (property, group) in &node.conditional_properties {
            let (method, apply_true, apply_false) = match property {
                ConditionalProperty::DisabledIf => ("setCellEnabled", false, !node.disabled),
                ConditionalProperty::HiddenIf => ("setCellVisible", false, !node.hidden),
                ConditionalProperty::RequiredIf => ("setCellRequired", true, node.required),
            };
            compile_row_effect(
                ctx,
                self.index,
                *property,
                group,
                &row,
                &Self::cell_call(column, method, apply_true),
                &Self::cell_call(column, method, apply_false),
            )?;
        }

        Ok(ControlBuilder::new(ctx, "Column", Some(&node.id))
            .setting_if(node.hidden, "visible", "false")
            .setting("label", js::quote(node.caption_or_id()))
            .setting("template", cell)
            .render())
    }

    fn value_property(&self) -> &'static str {
        "text"
    }

    fn change_dependency(&self, ctx: &mut CompilationContext) -> Result<Option<Dependency>> {
        let table = self.table(ctx)?;
        Ok(Some(Dependency::event(&table.id, SELECTION_CHANGE_EVENT)))
    }

    /// Value of the column in the table's selected row.
    fn build_js_value_getter(&self, ctx: &mut CompilationContext, _column: Option<&str>) -> Result<String> {
        let column = self.column_name(ctx)?;
        let table = self.table(ctx)?;
        let element = ctx.element(table.index)?;
        element.build_js_value_getter(ctx, Some(column))
    }

    fn build_js_value_setter(
        &self,
        ctx: &mut CompilationContext,
        _column: Option<&str>,
        value_js: &str,
    ) -> Result<Option<String>> {
        let column = self.column_name(ctx)?;
        let table = self.table(ctx)?;
        let element = ctx.element(table.index)?;
        element.build_js_value_setter(ctx, Some(column), value_js)
    }

    fn build_js_set_disabled(&self, _ctx: &CompilationContext, _disabled: bool) -> String {
        String::new()
    }

    fn build_js_set_required(&self, _ctx: &CompilationContext, _required: bool) -> String {
        String::new()
    }
}
