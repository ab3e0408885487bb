//! Include-what-you-use check for CMake modules.
//!
//! Every file is matched against every registry rule. A file that includes a
//! module without calling any of its commands gets a "redundant include"
//! finding; a file that calls a module's command without including it gets a
//! "missing include" finding. The check is purely textual, so false positives
//! are fixed by refining the registry patterns.

use crate::config::Config;
use crate::finding::Finding;
use crate::naming;
use crate::registry::Registry;
use crate::source::SourceFile;

pub fn analyze(files: &[SourceFile], registry: &Registry, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    for file in files {
        let own_name = naming::self_name(&file.path, &config.self_name_marker);

        for rule in registry.rules() {
            if own_name == rule.name {
                continue;
            }

            let has_include = rule.is_included(&file.code);
            let has_usage = rule.is_used(&file.code);

            match (has_include, has_usage) {
                (true, false) => findings.push(Finding::redundant_include(&rule.name, &file.path)),
                (false, true) => findings.push(Finding::missing_include(&rule.name, &file.path)),
                _ => {}
            }
        }
    }

    tracing::debug!("include analysis: {} findings across {} files", findings.len(), files.len());
    findings
}
