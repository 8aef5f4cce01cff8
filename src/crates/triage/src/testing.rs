//! Test fixtures shared by unit and integration tests

/// Builders for registry entries and manifests used across the test suite
pub mod fixtures {
    use crate::manifest::{Activation, Manifest, RegistryEntry};

    /// Phrase-only entry with the default priority (50)
    pub fn entry(name: &str, handler: &str, phrases: &[&str]) -> RegistryEntry {
        RegistryEntry {
            name: name.to_string(),
            handler: handler.to_string(),
            activation: Activation {
                phrases: phrases.iter().map(|p| p.to_string()).collect(),
                pattern: None,
            },
            priority: 50,
            entry_point: format!("registry/{}/", name),
            capabilities: vec!["read".to_string()],
        }
    }

    /// Entry with both phrases and a pattern
    pub fn entry_with_pattern(
        name: &str,
        handler: &str,
        phrases: &[&str],
        pattern: &str,
    ) -> RegistryEntry {
        let mut e = entry(name, handler, phrases);
        e.activation.pattern = Some(pattern.to_string());
        e
    }

    /// The two-specialist manifest from the routing reference scenario:
    /// a database entry and a frontend entry, equal priority
    pub fn sample_manifest() -> Manifest {
        Manifest {
            entries: vec![
                entry(
                    "db",
                    "database-architect",
                    &["database-design", "database design", "database"],
                ),
                entry(
                    "front",
                    "frontend-specialist",
                    &["frontend-design", "frontend design", "frontend"],
                ),
            ],
        }
    }
}
