use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::texture_loader::has_image_extension;

/// Where the raw reference list comes from. Re-read on demand.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSources {
    pub inline: Vec<String>,
    pub list_file: Option<PathBuf>,
    pub directory: Option<PathBuf>,
}

impl ReferenceSources {
    /// Inline references first, then the list file lines, then the directory scan.
    ///
    /// Lines are returned raw; trimming and blank removal belong to the grid.
    pub fn gather(&self) -> Result<Vec<String>> {
        let mut references = self.inline.clone();

        if let Some(list_file) = &self.list_file {
            let contents = fs::read_to_string(list_file)
                .with_context(|| format!("failed to read reference list {}", list_file.display()))?;
            references.extend(contents.lines().map(str::to_string));
        }

        if let Some(directory) = &self.directory {
            let paths = load_sorted_image_paths(directory)?;
            references.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        }

        Ok(references)
    }
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
