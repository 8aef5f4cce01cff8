//! Registry manifest loading and validation
//!
//! The manifest is the full ordered collection of registry entries for
//! one deployment, serialized as a JSON document. It is produced offline
//! by the generation collaborator (see [`crate::generate`]) and loaded
//! fresh for every routing call — the routing core only ever reads it.
//!
//! Load-time obligations:
//! - entry `name`s must be unique across the manifest; duplicates are
//!   rejected, never silently deduplicated
//! - an absent activation `pattern` is tolerated (phrase-only entries
//!   are valid)
//! - several entries may share a `handler`; the selector's
//!   deduplication step depends on this being allowed

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Matching rules that decide whether a prompt activates an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Case-insensitive literal substrings; order is preserved for
    /// deterministic output but does not affect scoring
    #[serde(default)]
    pub phrases: Vec<String>,

    /// Optional regular expression, searched case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Activation {
    /// Whether at least one activation rule is present
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.pattern.is_none()
    }
}

/// One routable capability description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Unique capability identifier (unique across the manifest)
    pub name: String,

    /// Specialist target this entry routes to; many entries may share one
    pub handler: String,

    /// Matching rules for this entry
    #[serde(default)]
    pub activation: Activation,

    /// Author-assigned static importance, 0-100
    #[serde(default)]
    pub priority: i64,

    /// Opaque reference to the resource the handler loads if selected.
    /// Passed through unmodified, never interpreted by the router.
    pub entry_point: String,

    /// Tool identifiers granted to the handler if selected; passed through
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// The full ordered set of registry entries for one deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<RegistryEntry>,
}

impl Manifest {
    /// Build a manifest from entries, enforcing the name-uniqueness invariant
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let manifest = Self { entries };
        manifest.check_integrity()?;
        Ok(manifest)
    }

    /// Parse a manifest from its JSON document form
    ///
    /// Fails fast on malformed JSON and on duplicate entry names; a
    /// partially-parsed manifest never reaches the selector.
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        manifest.check_integrity()?;
        Ok(manifest)
    }

    /// Load and validate a manifest from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            TriageError::Manifest(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let manifest = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            entries = manifest.entries.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Serialize to the canonical JSON document form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct handlers referenced by the manifest, in declaration order
    pub fn handlers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.handler.as_str()))
            .map(|e| e.handler.as_str())
            .collect()
    }

    /// Reject manifests that violate the name-uniqueness invariant
    fn check_integrity(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(TriageError::Manifest(format!(
                    "Duplicate entry name: {}",
                    entry.name
                )));
            }
        }
        debug!(entries = self.entries.len(), "Manifest integrity check passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_parse_minimal_entry() {
        let json = r#"{
            "entries": [
                {
                    "name": "database-design",
                    "handler": "database-architect",
                    "activation": {"phrases": ["database"]},
                    "priority": 50,
                    "entry_point": "skills/database-design/"
                }
            ]
        }"#;

        let manifest = Manifest::from_json(json).unwrap();
        assert_eq!(manifest.len(), 1);

        let entry = &manifest.entries[0];
        assert_eq!(entry.handler, "database-architect");
        // Absent pattern and capabilities are tolerated
        assert_eq!(entry.activation.pattern, None);
        assert!(entry.capabilities.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut entries = vec![
            fixtures::entry("db", "database-architect", &["database"]),
            fixtures::entry("db", "frontend-specialist", &["frontend"]),
        ];
        let err = Manifest::new(entries.clone()).unwrap_err();
        assert!(matches!(err, TriageError::Manifest(_)));
        assert!(err.to_string().contains("db"));

        // Renaming one entry makes the same collection valid
        entries[1].name = "front".to_string();
        assert!(Manifest::new(entries).is_ok());
    }

    #[test]
    fn test_shared_handler_allowed() {
        let manifest = Manifest::new(vec![
            fixtures::entry("frontend-design", "frontend-specialist", &["frontend"]),
            fixtures::entry("tailwind-patterns", "frontend-specialist", &["tailwind"]),
        ])
        .unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.handlers(), vec!["frontend-specialist"]);
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = Manifest::from_json("{\"entries\": [").unwrap_err();
        assert!(matches!(err, TriageError::Serde(_)));
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let manifest = fixtures::sample_manifest();
        let json = manifest.to_json().unwrap();
        let reloaded = Manifest::from_json(&json).unwrap();
        assert_eq!(manifest, reloaded);
    }
}
