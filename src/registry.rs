//! Embedded registry of CMake modules and the usage patterns that signal a
//! file actually needs the module's `include()`.
//!
//! Each entry maps a module name (optionally namespaced with `/`) to usage
//! patterns. A pattern is classified once, when the registry is built:
//! bare identifiers (commands, or `Namespace::Target` symbols) become
//! [`Pattern::Literal`], anything else that compiles becomes
//! [`Pattern::Regex`]. Strings that fail to compile fall back to literals.

use anyhow::{Context, Result};
use regex::Regex;

/// Module name → usage patterns. Keep sorted roughly by upstream then project modules.
const BUILTIN_MODULES: &[(&str, &[&str])] = &[
    ("CheckCCompilerFlag", &["check_c_compiler_flag"]),
    ("CheckCompilerFlag", &["check_compiler_flag"]),
    ("CheckCSourceCompiles", &["check_c_source_compiles"]),
    ("CheckCSourceRuns", &["check_c_source_runs"]),
    ("CheckCXXCompilerFlag", &["check_cxx_compiler_flag"]),
    ("CheckCXXSourceCompiles", &["check_cxx_source_compiles"]),
    ("CheckCXXSourceRuns", &["check_cxx_source_runs"]),
    ("CheckCXXSymbolExists", &["check_cxx_symbol_exists"]),
    ("CheckFunctionExists", &["check_function_exists"]),
    ("CheckIncludeFile", &["check_include_file"]),
    ("CheckIncludeFileCXX", &["check_include_file_cxx"]),
    ("CheckIncludeFiles", &["check_include_files"]),
    ("CheckIPOSupported", &["check_ipo_supported"]),
    ("CheckLanguage", &["check_language"]),
    ("CheckLibraryExists", &["check_library_exists"]),
    ("CheckLinkerFlag", &["check_linker_flag"]),
    ("CheckPrototypeDefinition", &["check_prototype_definition"]),
    ("CheckSourceCompiles", &["check_source_compiles"]),
    ("CheckSourceRuns", &["check_source_runs"]),
    ("CheckStructHasMember", &["check_struct_has_member"]),
    ("CheckSymbolExists", &["check_symbol_exists"]),
    ("CheckTypeSize", &["check_type_size"]),
    ("CheckVariableExists", &["check_variable_exists"]),
    ("CMakeDependentOption", &["cmake_dependent_option"]),
    ("CMakePrintHelpers", &["cmake_print_properties", "cmake_print_variables"]),
    (
        "CMakePushCheckState",
        &[
            "cmake_pop_check_state",
            "cmake_push_check_state",
            "cmake_reset_check_state",
        ],
    ),
    (
        "ExternalProject",
        &[
            "ExternalProject_Add",
            "ExternalProject_Add_Step",
            "ExternalProject_Add_StepDependencies",
            "ExternalProject_Add_StepTargets",
            "ExternalProject_Get_Property",
        ],
    ),
    (
        "FeatureSummary",
        &["add_feature_info", "feature_summary", "set_package_properties"],
    ),
    (
        "FetchContent",
        &[
            "FetchContent_Declare",
            "FetchContent_GetProperties",
            "FetchContent_MakeAvailable",
            "FetchContent_Populate",
            "FetchContent_SetPopulated",
        ],
    ),
    (
        "FindPackageHandleStandardArgs",
        &["find_package_check_version", "find_package_handle_standard_args"],
    ),
    ("FindPackageMessage", &["find_package_message"]),
    ("ProcessorCount", &["processorcount", "ProcessorCount"]),
    ("PHP/AddCustomCommand", &["php_add_custom_command"]),
    (
        "PHP/CheckAttribute",
        &["php_check_function_attribute", "php_check_variable_attribute"],
    ),
    ("PHP/CheckCompilerFlag", &["php_check_compiler_flag"]),
    ("PHP/ConfigureFile", &["php_configure_file"]),
    ("PHP/Install", &["php_install"]),
    ("PHP/PkgConfigGenerator", &["pkgconfig_generate_pc"]),
    ("PHP/SearchLibraries", &["php_search_libraries"]),
    ("PHP/SystemExtensions", &["PHP::SystemExtensions"]),
];

/// A usage pattern, classified when the registry is loaded.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Command name, or a `Namespace::Target` symbol when it contains `::`.
    Literal(String),
    /// Regular expression applied as-is to comment-stripped code.
    Regex(Regex),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        if is_bare_token(raw) {
            return Pattern::Literal(raw.to_string());
        }
        match Regex::new(raw) {
            Ok(re) => Pattern::Regex(re),
            Err(e) => {
                tracing::debug!("pattern {raw:?} is not a valid regex ({e}), using it literally");
                Pattern::Literal(raw.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(token) => token,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    fn matcher(&self) -> Result<Regex> {
        match self {
            Pattern::Regex(re) => Ok(re.clone()),
            Pattern::Literal(token) => {
                let escaped = regex::escape(token);
                let command = format!(r"^[ \t]*{escaped}[ \t]*\(");
                let source = if token.contains("::") {
                    format!(r"(?m)(?:^|[^A-Za-z0-9_]){escaped}(?:[^A-Za-z0-9_]|$)|{command}")
                } else {
                    format!("(?m){command}")
                };
                Regex::new(&source).with_context(|| format!("failed to compile usage pattern {token:?}"))
            }
        }
    }
}

fn is_bare_token(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'))
}

/// A module together with its usage patterns and precompiled matchers.
#[derive(Debug)]
pub struct ModuleRule {
    pub name: String,
    pub patterns: Vec<Pattern>,
    include: Regex,
    usage: Vec<Regex>,
}

impl ModuleRule {
    pub fn new(name: &str, patterns: &[&str]) -> Result<Self> {
        let patterns: Vec<Pattern> = patterns.iter().map(|p| Pattern::parse(p)).collect();
        let usage = patterns
            .iter()
            .map(Pattern::matcher)
            .collect::<Result<Vec<_>>>()?;
        let include = Regex::new(&format!(
            r"(?m)^[ \t]*include[ \t]*\([ \t]*{}[ \t]*\)",
            regex::escape(name)
        ))
        .with_context(|| format!("failed to compile include pattern for {name}"))?;
        Ok(Self {
            name: name.to_string(),
            patterns,
            include,
            usage,
        })
    }

    /// Whether `code` (comment-stripped) has an `include(<name>)` line.
    pub fn is_included(&self, code: &str) -> bool {
        self.include.is_match(code)
    }

    /// Whether any usage pattern matches `code` (comment-stripped).
    pub fn is_used(&self, code: &str) -> bool {
        self.usage.iter().any(|re| re.is_match(code))
    }
}

/// Ordered collection of module rules.
#[derive(Debug)]
pub struct Registry {
    rules: Vec<ModuleRule>,
}

impl Registry {
    /// The embedded registry.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(BUILTIN_MODULES)
    }

    pub fn from_entries(entries: &[(&str, &[&str])]) -> Result<Self> {
        let rules = entries
            .iter()
            .map(|(name, patterns)| ModuleRule::new(name, patterns))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ModuleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// `modules` subcommand: print the embedded registry.
pub fn run() -> Result<()> {
    let registry = Registry::builtin()?;
    for rule in registry.rules() {
        let patterns: Vec<&str> = rule.patterns.iter().map(Pattern::as_str).collect();
        println!("{:<32} {}", rule.name, patterns.join(", "));
    }
    eprintln!("{} modules", registry.len());
    Ok(())
}
