//! Derive CMake module names from file paths.
//!
//! `cmake/modules/PHP/Install.cmake` is the module `PHP/Install`: the
//! namespace is the chain of directories between the file and the nearest
//! root marker directory.

use std::path::Path;

/// File name with a trailing `.cmake` removed.
pub fn module_stem(path: &Path) -> String {
    let name = file_name(path).unwrap_or_default();
    name.strip_suffix(".cmake").unwrap_or(name).to_string()
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Name a file would have as a module, judged from its immediate parent only.
///
/// Files directly inside the `marker` directory are un-namespaced.
pub fn self_name(path: &Path, marker: &str) -> String {
    let stem = module_stem(path);
    match path.parent().and_then(file_name) {
        Some(parent) if parent != marker => format!("{parent}/{stem}"),
        _ => stem,
    }
}

/// Namespaced module name, walking at most `max_depth` parent directories
/// up to the first one named in `markers`.
///
/// When no marker is found within the bound, only the immediate parent is
/// used as the namespace.
pub fn namespaced_name(path: &Path, markers: &[String], max_depth: usize) -> String {
    let stem = module_stem(path);
    let mut segments: Vec<&str> = Vec::new();
    let mut reached_marker = false;
    let mut dir = path.parent();

    for _ in 0..max_depth {
        let Some(name) = dir.and_then(file_name) else {
            break;
        };
        if markers.iter().any(|m| m == name) {
            reached_marker = true;
            break;
        }
        segments.push(name);
        dir = dir.and_then(Path::parent);
    }

    if !reached_marker {
        segments = path.parent().and_then(file_name).into_iter().collect();
    }

    segments.reverse();
    segments.push(&stem);
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn markers() -> Vec<String> {
        vec!["cmake".to_string(), "modules".to_string()]
    }

    #[test]
    fn stem_drops_only_cmake_extension() {
        assert_eq!(module_stem(Path::new("/p/cmake/Foo.cmake")), "Foo");
        assert_eq!(module_stem(Path::new("/p/CMakeLists.txt")), "CMakeLists.txt");
        assert_eq!(module_stem(Path::new("/p/check_fnmatch.c")), "check_fnmatch.c");
    }

    #[test]
    fn self_name_under_marker_is_bare() {
        assert_eq!(self_name(Path::new("/p/cmake/Foo.cmake"), "cmake"), "Foo");
    }

    #[test]
    fn self_name_elsewhere_is_prefixed() {
        assert_eq!(
            self_name(Path::new("/p/cmake/modules/PHP/Install.cmake"), "cmake"),
            "PHP/Install"
        );
        assert_eq!(
            self_name(Path::new("/p/cmake/modules/FindIconv.cmake"), "cmake"),
            "modules/FindIconv"
        );
    }

    #[test]
    fn namespaced_name_directly_under_marker() {
        let path = Path::new("/p/cmake/modules/Foo.cmake");
        assert_eq!(namespaced_name(path, &markers(), 10), "Foo");
    }

    #[test]
    fn namespaced_name_collects_nested_segments() {
        let path = Path::new("/p/cmake/modules/PHP/Check/Fnmatch.cmake");
        assert_eq!(namespaced_name(path, &markers(), 10), "PHP/Check/Fnmatch");
    }

    #[test]
    fn namespaced_name_respects_depth_bound() {
        let path = Path::new("/p/cmake/modules/A/B/C/Deep.cmake");
        assert_eq!(namespaced_name(path, &markers(), 3), "C/Deep");
        assert_eq!(namespaced_name(path, &markers(), 4), "A/B/C/Deep");
    }

    #[test]
    fn namespaced_name_without_marker_uses_parent() {
        let path = PathBuf::from("/srv/project/tools/Helper.cmake");
        assert_eq!(namespaced_name(&path, &markers(), 10), "tools/Helper");
    }

    #[test]
    fn namespaced_name_keeps_artifact_extension() {
        let path = Path::new("/p/cmake/modules/PHP/CheckFnmatch/check_fnmatch.c");
        assert_eq!(
            namespaced_name(path, &markers(), 10),
            "PHP/CheckFnmatch/check_fnmatch.c"
        );
    }
}
