//! Remove CMake comments before any pattern matching.
//!
//! Quoted strings are not parsed: a `#` inside `"..."` preceded by whitespace
//! is treated as a comment start.

use regex::Regex;
use std::sync::OnceLock;

fn bracket_comment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)#\[=*\[.*?\]=*\]").expect("bracket comment regex"))
}

fn line_comment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)(?:^[ \t]*|[ \t]+)#.*$").expect("line comment regex"))
}

/// Strip bracket comments (`#[[ ... ]]`, `#[==[ ... ]==]`) and line comments.
pub fn strip_comments(raw: &str) -> String {
    let without_brackets = bracket_comment().replace_all(raw, "");
    line_comment().replace_all(&without_brackets, "").into_owned()
}
