//! `cmake-check check`: run every check over a project tree.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::finding::Finding;
use crate::registry::Registry;
use crate::{analyzer, set_literal, source, unused};

/// Which checks to run and how to print the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    pub json: bool,
    pub skip_unused: bool,
    pub skip_set_literal: bool,
}

/// Run the checks and return every finding in report order.
pub fn collect(root: &Path, config: &Config, options: Options) -> Result<Vec<Finding>> {
    if !root.exists() {
        anyhow::bail!("path not found: {}", root.display());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", root.display()))?;
    tracing::info!("working tree {}", root.display());

    let files = source::load_all(&root)?;
    tracing::info!("checking {} CMake files", files.len());

    let registry = Registry::builtin()?;
    let mut findings = analyzer::analyze(&files, &registry, config);

    if !options.skip_set_literal {
        findings.extend(set_literal::check_set_literals(&files));
    }

    if !options.skip_unused {
        let modules_dir = root.join(&config.modules_dir);
        if modules_dir.is_dir() {
            let candidates = unused::discover(&modules_dir)?;
            tracing::info!(
                "checking {} find modules and {} utility modules",
                candidates.find_modules.len(),
                candidates.modules.len()
            );
            findings.extend(unused::find_unused_find_modules(&candidates.find_modules, &files)?);
            findings.extend(unused::find_unused_modules(&candidates.modules, &files, config)?);
        } else {
            tracing::info!(
                "no modules directory at {}, skipping unused module checks",
                modules_dir.display()
            );
        }
    }

    Ok(findings)
}

/// Print findings and return whether the tree is clean.
pub fn run(root: &Path, config: &Config, options: Options) -> Result<bool> {
    let findings = collect(root, config, options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for finding in &findings {
            println!("{finding}");
        }
    }

    if findings.is_empty() {
        eprintln!("cmake-check: Done");
        Ok(true)
    } else {
        eprintln!("cmake-check: {} issue(s) found", findings.len());
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("cmake/modules/PHP")).unwrap();
        fs::write(
            root.join("CMakeLists.txt"),
            "include(CheckSymbolExists)\ninclude(PHP/Install)\ncheck_symbol_exists(a b c)\nfind_package(Iconv)\nphp_install()\n",
        )
        .unwrap();
        fs::write(root.join("cmake/modules/FindIconv.cmake"), "").unwrap();
        fs::write(
            root.join("cmake/modules/PHP/Install.cmake"),
            "function(php_install)\nendfunction()\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn clean_project_has_no_findings() {
        let dir = project();
        let findings = collect(dir.path(), &Config::default(), Options::default()).unwrap();
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn findings_are_ordered_by_check() {
        let dir = project();
        let root = dir.path();
        fs::write(root.join("cmake/modules/FindZlib.cmake"), "").unwrap();
        fs::write(root.join("cmake/modules/Unused.cmake"), "").unwrap();
        fs::write(root.join("cmake/extra.cmake"), "set(FOO)\ninclude(FeatureSummary)\n").unwrap();

        let findings = collect(root, &Config::default(), Options::default()).unwrap();
        let kinds: Vec<FindingKind> = findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::RedundantInclude,
                FindingKind::SetWithoutValue,
                FindingKind::UnusedFindModule,
                FindingKind::UnusedModule,
            ]
        );
    }

    #[test]
    fn skip_options_disable_checks() {
        let dir = project();
        let root = dir.path();
        fs::write(root.join("cmake/modules/FindZlib.cmake"), "").unwrap();
        fs::write(root.join("cmake/extra.cmake"), "set(FOO)\n").unwrap();

        let options = Options {
            skip_unused: true,
            skip_set_literal: true,
            ..Options::default()
        };
        assert!(collect(root, &Config::default(), options).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = collect(
            Path::new("/nonexistent/project"),
            &Config::default(),
            Options::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("path not found"));
    }

    #[test]
    fn missing_modules_dir_skips_unused_checks() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "project(x)\n").unwrap();
        assert!(collect(dir.path(), &Config::default(), Options::default())
            .unwrap()
            .is_empty());
    }
}
