//! Generation collaborator
//!
//! Produces the canonical manifest from the capability catalog and
//! optionally scaffolds per-capability metadata files. Entirely offline;
//! never part of the routing call path. All functions take explicit
//! target directories and return a report of what was done — nothing
//! here depends on ambient working-directory state.

use crate::catalog::{self, CAPABILITIES, DEFAULT_CAPABILITIES};
use crate::config::LayoutConfig;
use crate::error::{Result, TriageError};
use crate::manifest::{Activation, Manifest, RegistryEntry};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Report of a manifest generation run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Where the manifest document was written
    pub manifest_path: PathBuf,

    /// Number of entries written
    pub entries: usize,
}

/// Report of a metadata scaffolding run
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    /// Metadata files written
    pub generated: Vec<PathBuf>,

    /// Entries skipped because their metadata file already exists
    pub skipped: Vec<String>,

    /// Entries skipped because their entry-point directory is absent
    pub missing: Vec<String>,
}

/// Build the manifest from the capability catalog
///
/// Pure function of the catalog and the layout; the catalog is the only
/// source of capability names and handler mappings. Each entry activates
/// on three literal forms of its name (hyphenated, spaced, leading
/// keyword) and on a pattern alternating the same forms.
pub fn build_manifest(layout: &LayoutConfig) -> Manifest {
    let entries = CAPABILITIES
        .iter()
        .map(|name| {
            let spaced = name.replace('-', " ");
            let keyword = catalog::keyword(name);

            // The three forms collapse for unhyphenated names; keep the
            // first occurrence so phrases stay distinct
            let mut phrases = Vec::new();
            for form in [name.to_string(), spaced, keyword.to_string()] {
                if !phrases.contains(&form) {
                    phrases.push(form);
                }
            }

            let pattern = format!(
                "({})",
                phrases
                    .iter()
                    .map(|p| regex::escape(p))
                    .collect::<Vec<_>>()
                    .join("|")
            );

            RegistryEntry {
                name: name.to_string(),
                handler: catalog::handler_for(name).to_string(),
                activation: Activation {
                    phrases,
                    pattern: Some(pattern),
                },
                priority: 50,
                entry_point: format!("{}/{}/", layout.registry_dir, name),
                capabilities: DEFAULT_CAPABILITIES.iter().map(|c| c.to_string()).collect(),
            }
        })
        .collect();

    // Catalog names are unique, so this cannot fail
    Manifest { entries }
}

/// Generate the manifest and write it under the target directory
pub async fn write_manifest(
    target_dir: &Path,
    layout: &LayoutConfig,
    manifest_rel_path: &str,
) -> Result<GenerateReport> {
    let manifest = build_manifest(layout);
    let manifest_path = target_dir.join(manifest_rel_path);

    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            TriageError::Generate(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    fs::write(&manifest_path, manifest.to_json()?)
        .await
        .map_err(|e| {
            TriageError::Generate(format!("Failed to write {}: {}", manifest_path.display(), e))
        })?;

    info!(
        path = %manifest_path.display(),
        entries = manifest.len(),
        "Generated manifest"
    );

    Ok(GenerateReport {
        manifest_path,
        entries: manifest.len(),
    })
}

/// Scaffold a metadata file into each existing entry-point directory
///
/// Skips entries whose directory is absent and entries whose metadata
/// file already exists; existing files are never overwritten.
pub async fn scaffold_metadata(
    target_dir: &Path,
    manifest: &Manifest,
) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for entry in &manifest.entries {
        let folder = target_dir.join(&entry.entry_point);
        if !folder.is_dir() {
            debug!(entry = %entry.name, "Entry point directory absent, skipping scaffold");
            report.missing.push(entry.name.clone());
            continue;
        }

        let metadata_path = folder.join("capability.md");
        if metadata_path.exists() {
            report.skipped.push(entry.name.clone());
            continue;
        }

        fs::write(&metadata_path, metadata_template(entry))
            .await
            .map_err(|e| {
                TriageError::Generate(format!(
                    "Failed to write {}: {}",
                    metadata_path.display(),
                    e
                ))
            })?;
        report.generated.push(metadata_path);
    }

    info!(
        generated = report.generated.len(),
        skipped = report.skipped.len(),
        missing = report.missing.len(),
        "Scaffolded capability metadata"
    );
    Ok(report)
}

fn metadata_template(entry: &RegistryEntry) -> String {
    let title = entry
        .name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "---\n\
         handler: {handler}\n\
         description: \"Specialist coverage for {name}.\"\n\
         capabilities: [{capabilities}]\n\
         priority: {priority}\n\
         ---\n\
         \n\
         # {title}\n\
         This capability handles tasks related to {name}.\n",
        handler = entry.handler,
        name = entry.name,
        capabilities = entry.capabilities.join(", "),
        priority = entry.priority,
        title = title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_HANDLER;

    #[test]
    fn test_build_manifest_covers_whole_catalog() {
        let manifest = build_manifest(&LayoutConfig::default());
        assert_eq!(manifest.len(), CAPABILITIES.len());

        // Name uniqueness holds by construction
        assert!(Manifest::new(manifest.entries.clone()).is_ok());
    }

    #[test]
    fn test_hyphenated_entry_shape() {
        let manifest = build_manifest(&LayoutConfig::default());
        let entry = manifest
            .entries
            .iter()
            .find(|e| e.name == "database-design")
            .unwrap();

        assert_eq!(entry.handler, "database-architect");
        assert_eq!(
            entry.activation.phrases,
            vec!["database-design", "database design", "database"]
        );
        assert_eq!(
            entry.activation.pattern.as_deref(),
            Some(r"(database\-design|database design|database)")
        );
        assert_eq!(entry.priority, 50);
        assert_eq!(entry.entry_point, ".triage/registry/database-design/");
        assert_eq!(entry.capabilities, vec!["read", "grep", "shell"]);
    }

    #[test]
    fn test_unhyphenated_entry_collapses_phrases() {
        let manifest = build_manifest(&LayoutConfig::default());
        let entry = manifest.entries.iter().find(|e| e.name == "docx").unwrap();

        // name, spaced form and keyword are identical: one phrase, not three
        assert_eq!(entry.activation.phrases, vec!["docx"]);
        assert_eq!(entry.handler, DEFAULT_HANDLER);
    }

    #[test]
    fn test_generated_patterns_compile() {
        let manifest = build_manifest(&LayoutConfig::default());
        for entry in &manifest.entries {
            let pattern = entry.activation.pattern.as_ref().unwrap();
            assert!(
                regex::Regex::new(pattern).is_ok(),
                "pattern for {} does not compile",
                entry.name
            );
        }
    }

    #[test]
    fn test_metadata_template_front_matter() {
        let manifest = build_manifest(&LayoutConfig::default());
        let entry = manifest
            .entries
            .iter()
            .find(|e| e.name == "database-design")
            .unwrap();

        let content = metadata_template(entry);
        assert!(content.starts_with("---\n"));
        assert!(content.contains("handler: database-architect"));
        assert!(content.contains("# Database Design"));
    }
}
