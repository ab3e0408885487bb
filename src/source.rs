//! CMake source discovery and loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::strip;

/// A CMake file read once per run, with its comment-stripped code cached.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub raw: String,
    pub code: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_raw(path.to_path_buf(), raw))
    }

    pub fn from_raw(path: PathBuf, raw: String) -> Self {
        let code = strip::strip_comments(&raw);
        Self { path, raw, code }
    }
}

/// Whether `path` is a file the checks should look at.
pub fn is_cmake_file(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => {
            name.ends_with(".cmake") || name == "CMakeLists.txt" || name == "CMakeLists.txt.in"
        }
        None => false,
    }
}

/// Lazily walk `root` for files accepted by `filter`, in lexicographic order
/// per directory. Symlinks to files are yielded; symlinked directories are not
/// descended into. Calling again restarts the walk.
pub fn walk<F>(root: &Path, filter: F) -> impl Iterator<Item = Result<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.path().is_file() && filter(entry.path()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(anyhow::Error::new(e).context("failed to walk directory"))),
        })
}

/// Read every CMake file under `root` (or `root` itself when it is a file).
pub fn load_all(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    if root.is_file() {
        files.push(SourceFile::read(root)?);
        return Ok(files);
    }
    for path in walk(root, is_cmake_file) {
        let path = path?;
        let file = SourceFile::read(&path)?;
        tracing::debug!("read {} ({} bytes)", path.display(), file.raw.len());
        files.push(file);
    }
    Ok(files)
}
