#![deny(clippy::all)]

/**
 * Widget Compiler CLI
 *
 * Compiles page descriptions found on disk into one JavaScript module each.
 */
pub use widget_compiler as compiler;

pub mod compile;
pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{error, info};

use crate::compile::{discover_files, parallel_compile};
use crate::config::ProjectConfig;

/// Options of one `wgc` run. Command line values win over the project file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub inputs: Vec<String>,
    pub config: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub lenient: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with the rendered error chain.
    pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn run(options: &RunOptions) -> anyhow::Result<RunSummary> {
    let mut project = match &options.config {
        Some(path) => ProjectConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ProjectConfig {
            base_dir: PathBuf::from("."),
            ..ProjectConfig::default()
        },
    };
    if options.lenient {
        project.compiler.lenient_links = true;
    }

    let (base_dir, patterns) = if options.inputs.is_empty() {
        (project.base_dir.clone(), project.include.clone())
    } else {
        (PathBuf::from("."), options.inputs.clone())
    };
    let files = discover_files(&base_dir, &patterns, &project.exclude)?;
    if files.is_empty() {
        bail!("no page descriptions matched {:?}", patterns);
    }

    let out_dir = options.out_dir.clone().or_else(|| project.out_dir());
    if let Some(dir) = &out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut summary = RunSummary::default();
    for compiled in parallel_compile(&files, &project.compiler) {
        match compiled.result {
            Ok(output) => {
                let target = output_path(&compiled.input, out_dir.as_deref());
                fs::write(&target, output.to_module())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                info!("wrote {}", target.display());
                summary.written.push(target);
            }
            Err(e) => {
                error!("{:#}", e);
                summary.failed.push((compiled.input, format!("{:#}", e)));
            }
        }
    }
    Ok(summary)
}

/// `<out_dir>/<stem>.js`, or the input with a `.js` extension.
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    match (out_dir, input.file_stem()) {
        (Some(dir), Some(stem)) => dir.join(format!("{}.js", stem.to_string_lossy())),
        _ => input.with_extension("js"),
    }
}

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
