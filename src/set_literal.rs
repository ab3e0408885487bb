//! Flag `set(VAR)` calls without a value.
//!
//! A one-argument `set()` unsets the variable; the project style asks for the
//! explicit `set(VAR "")` form instead.

use regex::Regex;
use std::sync::OnceLock;

use crate::finding::Finding;
use crate::source::SourceFile;

fn set_without_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*set\([ \t\r\n]*([^ \t\r\n)]+)[ \t\r\n]*\)").expect("set() regex")
    })
}

pub fn check_set_literals(files: &[SourceFile]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for file in files {
        for caps in set_without_value().captures_iter(&file.code) {
            findings.push(Finding::set_without_value(&caps[1], &file.path));
        }
    }
    findings
}
