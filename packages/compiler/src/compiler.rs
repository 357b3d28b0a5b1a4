//! Compiler Facade
//!
//! Builds one compilation context per tree, compiles the root element and
//! assembles one module per view: the view's controller and its content
//! factory.

use log::info;

use crate::config::CompilerConfig;
use crate::context::{CompilationContext, ViewUnit};
use crate::elements::ElementRegistry;
use crate::error::Result;
use crate::model::{ModelBindings, PrefillModel};
use crate::output::js::{self, CONTROLLER_VAR};
use crate::output::CodeWriter;
use crate::prefill::register_prefill;
use crate::server::{PromiseServerAdapter, ServerAdapter};
use crate::translation::{StaticTranslator, Translator};
use crate::widget::{PageDescription, WidgetDescription, WidgetTree};

/// Generated code of one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledView {
    pub view_id: String,
    /// Module level statements run once when the module is defined.
    pub define: String,
    /// Controller object literal.
    pub controller: String,
    /// Expression constructing the view's controls.
    pub content: String,
}

impl CompiledView {
    fn from_unit(unit: ViewUnit) -> Self {
        CompiledView {
            define: unit.controller.render_define(),
            controller: unit.controller.render(),
            view_id: unit.controller.view_id().to_string(),
            content: unit.content,
        }
    }

    pub fn to_module(&self) -> String {
        let mut w = CodeWriter::new();
        w.println(&format!("// view {}", self.view_id));
        if !self.define.is_empty() {
            w.print_block(&self.define);
        }
        w.print_block(&format!(
            "ui.defineController({}, {});",
            js::quote(&self.view_id),
            self.controller
        ));
        w.block(
            &format!(
                "ui.defineView({}, function ({}) {{",
                js::quote(&self.view_id),
                CONTROLLER_VAR
            ),
            "});",
            |w| w.print_block(&format!("return {};", self.content)),
        );
        w.to_source()
    }
}

#[derive(Debug, Clone)]
pub struct CompilationOutput {
    pub page: String,
    /// The page view first, then one view per nested dialog.
    pub views: Vec<CompiledView>,
}

impl CompilationOutput {
    pub fn root(&self) -> Option<&CompiledView> {
        self.views.first()
    }

    pub fn view(&self, view_id: &str) -> Option<&CompiledView> {
        self.views.iter().find(|v| v.view_id == view_id)
    }

    pub fn to_module(&self) -> String {
        self.views
            .iter()
            .map(CompiledView::to_module)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub struct WidgetCompiler {
    config: CompilerConfig,
    server: Box<dyn ServerAdapter>,
    translator: Box<dyn Translator>,
    registry: ElementRegistry,
}

impl WidgetCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        let mut translator = StaticTranslator::with_defaults();
        translator.extend(&config.translations);
        WidgetCompiler {
            config,
            server: Box::new(PromiseServerAdapter),
            translator: Box::new(translator),
            registry: ElementRegistry::default(),
        }
    }

    pub fn with_server_adapter(mut self, server: impl ServerAdapter + 'static) -> Self {
        self.server = Box::new(server);
        self
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn compile(&self, tree: &WidgetTree, model: &dyn ModelBindings) -> Result<CompilationOutput> {
        let mut ctx = CompilationContext::new(
            tree,
            &self.config,
            model,
            self.server.as_ref(),
            self.translator.as_ref(),
            &self.registry,
        );
        let root = tree.root();
        if !tree.node(root).kind.is_view_root() {
            register_prefill(&mut ctx, root)?;
        }
        let content = ctx.compile_node(root)?;
        ctx.set_root_content(content);

        let views: Vec<CompiledView> = ctx
            .into_views()
            .into_iter()
            .map(CompiledView::from_unit)
            .collect();
        info!(
            "compiled page \"{}\": {} widgets into {} views",
            tree.page(),
            tree.len(),
            views.len()
        );
        Ok(CompilationOutput {
            page: tree.page().to_string(),
            views,
        })
    }

    pub fn compile_page(&self, page: &PageDescription) -> Result<CompilationOutput> {
        let tree = WidgetTree::from_page(page)?;
        let model = PrefillModel::from_registrations(&page.bindings);
        self.compile(&tree, &model)
    }

    /// Compiles either a page description (`{"widget": ...}`) or a bare widget.
    pub fn compile_json_str(&self, json: &str) -> Result<CompilationOutput> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("widget").is_some() {
            let page: PageDescription = serde_json::from_value(value)?;
            return self.compile_page(&page);
        }
        let root: WidgetDescription = serde_json::from_value(value)?;
        let tree = WidgetTree::from_description(None, &root)?;
        self.compile(&tree, &PrefillModel::new())
    }
}
