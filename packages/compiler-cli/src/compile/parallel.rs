use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};
use rayon::prelude::*;
use widget_compiler::{CompilationOutput, CompilerConfig, WidgetCompiler};

pub struct CompiledFile {
    pub input: PathBuf,
    pub result: anyhow::Result<CompilationOutput>,
}

/// Compiles every page description independently. The order of the result
/// follows `files`.
pub fn parallel_compile(files: &[PathBuf], config: &CompilerConfig) -> Vec<CompiledFile> {
    let start = Instant::now();
    info!("compiling {} page descriptions in parallel", files.len());

    let results: Vec<CompiledFile> = files
        .par_iter()
        .map(|path| CompiledFile {
            input: path.clone(),
            result: compile_file(path, config),
        })
        .collect();

    info!("compilation finished in {:?}", start.elapsed());
    results
}

pub fn compile_file(path: &Path, config: &CompilerConfig) -> anyhow::Result<CompilationOutput> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // one compiler per file: its adapters are not shareable across threads
    let compiler = WidgetCompiler::new(config.clone());
    let output = compiler
        .compile_json_str(&json)
        .with_context(|| format!("failed to compile {}", path.display()))?;
    debug!(
        "{}: page \"{}\" with {} views",
        path.display(),
        output.page,
        output.views.len()
    );
    Ok(output)
}
