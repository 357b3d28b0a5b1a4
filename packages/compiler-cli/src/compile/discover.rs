use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::warn;

/// Files matching any `include` pattern and no `exclude` pattern, sorted and
/// without duplicates. Relative patterns are resolved against `base_dir`.
pub fn discover_files(
    base_dir: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let excluded = exclude
        .iter()
        .map(|pattern| {
            let full = base_dir.join(pattern);
            glob::Pattern::new(&full.to_string_lossy())
                .map_err(|e| anyhow!("invalid exclude pattern '{}': {}", pattern, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for pattern in include {
        let full = base_dir.join(pattern);
        let entries = glob::glob(&full.to_string_lossy())
            .map_err(|e| anyhow!("invalid glob pattern '{}': {}", pattern, e))?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("skipping unreadable path: {}", e);
                    continue;
                }
            };
            if path.is_file() && !excluded.iter().any(|p| p.matches_path(&path)) {
                files.push(path);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
