use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use widget_compiler::CompilerConfig;

/// `wgc.json`: which page descriptions to compile, where to put the result
/// and the compiler policy to use.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Glob patterns, relative to the configuration file.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub out_dir: Option<String>,
    pub compiler: CompilerConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: ProjectConfig = serde_json::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Output directory, resolved against the configuration file.
    pub fn out_dir(&self) -> Option<PathBuf> {
        self.out_dir.as_ref().map(|dir| self.base_dir.join(dir))
    }
}
