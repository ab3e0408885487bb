//! Report local modules and find-modules that nothing references.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::finding::Finding;
use crate::naming;
use crate::source::{self, SourceFile};

/// A module file defined in the project's modules directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCandidate {
    /// Package name for find-modules, module stem otherwise.
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Candidates {
    pub find_modules: Vec<ModuleCandidate>,
    pub modules: Vec<ModuleCandidate>,
}

/// Package name of a `Find<Package>.cmake` file.
pub fn find_module_package(path: &Path) -> Option<&str> {
    path.file_name()?
        .to_str()?
        .strip_prefix("Find")?
        .strip_suffix(".cmake")
}

/// Collect every file under `modules_dir`, split into find-modules and the rest.
pub fn discover(modules_dir: &Path) -> Result<Candidates> {
    let mut candidates = Candidates::default();
    for path in source::walk(modules_dir, |_| true) {
        let path = path?;
        match find_module_package(&path).map(str::to_string) {
            Some(name) => candidates.find_modules.push(ModuleCandidate { name, path }),
            None => candidates.modules.push(ModuleCandidate {
                name: naming::module_stem(&path),
                path,
            }),
        }
    }
    Ok(candidates)
}

/// Find-modules whose package is never passed to `find_package()`.
pub fn find_unused_find_modules(
    candidates: &[ModuleCandidate],
    files: &[SourceFile],
) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for candidate in candidates {
        let re = Regex::new(&format!(
            r"find_package[ \t]*\([ \t\r\n]*{}[ \t\r\n)]",
            regex::escape(&candidate.name)
        ))
        .with_context(|| format!("failed to compile find_package pattern for {}", candidate.name))?;

        if !files.iter().any(|f| re.is_match(&f.code)) {
            findings.push(Finding::unused_find_module(&candidate.path));
        }
    }
    Ok(findings)
}

/// Modules never included by their namespaced name nor referenced by file name.
pub fn find_unused_modules(
    candidates: &[ModuleCandidate],
    files: &[SourceFile],
    config: &Config,
) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for candidate in candidates {
        let name = naming::namespaced_name(
            &candidate.path,
            &config.root_markers,
            config.max_namespace_depth,
        );
        let re = Regex::new(&format!(
            r"include[ \t]*\([ \t\r\n]*{}[ \t\r\n)]",
            regex::escape(&name)
        ))
        .with_context(|| format!("failed to compile include pattern for {name}"))?;
        let file_name = candidate
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let used = files
            .iter()
            .any(|f| re.is_match(&f.code) || (!file_name.is_empty() && f.code.contains(&file_name)));
        if !used {
            tracing::debug!("module {} ({name}) is not referenced", candidate.name);
            findings.push(Finding::unused_module(&candidate.path));
        }
    }
    Ok(findings)
}
