//! Validation collaborator
//!
//! Advisory audit of a manifest against the on-disk layout: every entry
//! should point at an existing entry-point directory and at a handler
//! that has a definition file, and should carry at least one activation
//! rule. The router never consults this at routing time — it is tooling
//! for keeping a deployment honest.
//!
//! Checks run against an explicit root directory and produce a
//! structured report instead of printing from the middle of the audit.

use crate::config::LayoutConfig;
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The deployment is broken for this entry
    Error,

    /// Worth fixing, but routing still works
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One finding for one manifest entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Name of the entry the finding concerns
    pub entry: String,

    pub severity: Severity,

    pub message: String,
}

/// Structured result of a validation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of entries audited
    pub checked: usize,

    /// Per-entry findings, in manifest order
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Number of error-severity findings
    pub fn errors(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings
    pub fn warnings(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Whether the audit found no errors (warnings allowed)
    pub fn passed(&self) -> bool {
        self.errors() == 0
    }

    fn push(&mut self, entry: &str, severity: Severity, message: String) {
        self.findings.push(Finding {
            entry: entry.to_string(),
            severity,
            message,
        });
    }
}

/// Audit every manifest entry against the layout under `root`
pub async fn validate_manifest(
    root: &Path,
    manifest: &Manifest,
    layout: &LayoutConfig,
) -> ValidationReport {
    let mut report = ValidationReport {
        checked: manifest.len(),
        ..Default::default()
    };

    for entry in &manifest.entries {
        let entry_point = root.join(&entry.entry_point);
        if !entry_point.is_dir() {
            report.push(
                &entry.name,
                Severity::Error,
                format!("Entry point missing: {}", entry.entry_point),
            );
        } else if !entry_point.join("capability.md").exists() {
            report.push(
                &entry.name,
                Severity::Warning,
                "Metadata file capability.md missing".to_string(),
            );
        }

        let handler_file = root
            .join(&layout.handlers_dir)
            .join(format!("{}.md", entry.handler));
        if !handler_file.exists() {
            report.push(
                &entry.name,
                Severity::Error,
                format!(
                    "Handler definition missing: {}/{}.md",
                    layout.handlers_dir, entry.handler
                ),
            );
        }

        if entry.activation.is_empty() {
            report.push(
                &entry.name,
                Severity::Warning,
                "No activation rules defined".to_string(),
            );
        }
    }

    info!(
        checked = report.checked,
        errors = report.errors(),
        warnings = report.warnings(),
        "Validation complete"
    );
    report
}
