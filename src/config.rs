use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG: &str = ".cmake-check.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory name under which module files are un-namespaced when
    /// deciding whether a file defines a registry module.
    pub self_name_marker: String,
    /// Directory names that end the namespace walk for local modules.
    pub root_markers: Vec<String>,
    /// Maximum number of parent directories walked to build a namespace.
    pub max_namespace_depth: usize,
    /// Local modules directory, relative to the checked root.
    pub modules_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            self_name_marker: "cmake".to_string(),
            root_markers: vec!["cmake".to_string(), "modules".to_string()],
            max_namespace_depth: 10,
            modules_dir: PathBuf::from("cmake/modules"),
        }
    }
}

/// Load config from `<root>/.cmake-check.toml`, then
/// ~/.config/cmake-check/config.toml, or return defaults.
pub fn load(root: &Path) -> Result<Config> {
    let project = if root.is_dir() {
        root.join(PROJECT_CONFIG)
    } else {
        root.parent().unwrap_or(Path::new(".")).join(PROJECT_CONFIG)
    };
    for path in [project, user_config_path()] {
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            return parse_file(&path);
        }
    }
    Ok(Config::default())
}

fn parse_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

fn user_config_path() -> PathBuf {
    dirs_config_dir().join("cmake-check").join("config.toml")
}

fn dirs_config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn project_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG),
            "max_namespace_depth = 3\nmodules_dir = \"build/modules\"\n",
        )
        .unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config.max_namespace_depth, 3);
        assert_eq!(config.modules_dir, PathBuf::from("build/modules"));
        assert_eq!(config.self_name_marker, "cmake");
        assert_eq!(config.root_markers, vec!["cmake", "modules"]);
    }

    #[test]
    fn invalid_project_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG), "max_namespace_depth = \"deep\"\n").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn parse_file_reads_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "self_name_marker = \"cmake\"\nroot_markers = [\"mods\"]\nmax_namespace_depth = 2\nmodules_dir = \"mods\"\n",
        )
        .unwrap();
        let config = parse_file(&path).unwrap();
        assert_eq!(config.root_markers, vec!["mods"]);
        assert_eq!(config.max_namespace_depth, 2);
    }
}
