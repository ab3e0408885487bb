use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    fn prefix(&self) -> &'static str {
        match self {
            Severity::Error => "E",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    RedundantInclude,
    MissingInclude,
    SetWithoutValue,
    UnusedFindModule,
    UnusedModule,
}

/// A single reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub message: String,
    pub file: PathBuf,
}

impl Finding {
    pub fn redundant_include(module: &str, file: &Path) -> Self {
        Self::error(
            FindingKind::RedundantInclude,
            format!("redundant include({module}) in {}", file.display()),
            file,
        )
    }

    pub fn missing_include(module: &str, file: &Path) -> Self {
        Self::error(
            FindingKind::MissingInclude,
            format!("missing include({module}) in {}", file.display()),
            file,
        )
    }

    pub fn set_without_value(variable: &str, file: &Path) -> Self {
        Self::error(
            FindingKind::SetWithoutValue,
            format!(
                "set({variable}) without a value in {}, use set({variable} \"\")",
                file.display()
            ),
            file,
        )
    }

    pub fn unused_find_module(file: &Path) -> Self {
        Self::error(
            FindingKind::UnusedFindModule,
            format!("unused find module {}", file.display()),
            file,
        )
    }

    pub fn unused_module(file: &Path) -> Self {
        Self::error(
            FindingKind::UnusedModule,
            format!("unused utility module {}", file.display()),
            file,
        )
    }

    fn error(kind: FindingKind, message: String, file: &Path) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message,
            file: file.to_path_buf(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.prefix(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_error_prefix() {
        let finding = Finding::missing_include("CheckTypeSize", Path::new("/p/CMakeLists.txt"));
        assert_eq!(
            finding.to_string(),
            "E: missing include(CheckTypeSize) in /p/CMakeLists.txt"
        );
    }

    #[test]
    fn serializes_kind_and_severity() {
        let finding = Finding::unused_find_module(Path::new("/p/cmake/modules/FindFoo.cmake"));
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["kind"], "unused-find-module");
        assert_eq!(json["file"], "/p/cmake/modules/FindFoo.cmake");
    }
}
