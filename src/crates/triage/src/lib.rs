//! # Triage - Heuristic Prompt Router
//!
//! Routes a free-text task description to the most appropriate
//! specialist handler out of a fixed registry, using lightweight
//! text-matching heuristics instead of a learned classifier. A
//! higher-level orchestrator can dispatch incoming requests to the
//! right specialist without spending a reasoning-model call on the
//! routing decision itself.
//!
//! ## Features
//!
//! - **Explainable scoring** - Every score is attributable to a
//!   specific phrase, pattern, or priority term
//! - **Handler deduplication** - Results answer "which handlers are
//!   relevant", never listing the same specialist twice
//! - **Clarify before guessing** - When nothing clears the confidence
//!   threshold the router asks for more detail instead of guessing
//! - **Stateless core** - Each call is `(manifest, prompt)` in, a
//!   tagged outcome out; nothing persists between calls
//! - **Offline collaborators** - Manifest generation and deployment
//!   validation live outside the routing call path
//!
//! ## Quick Start
//!
//! ```rust
//! use triage::{select, Manifest, SelectOptions};
//!
//! # fn example() -> triage::Result<()> {
//! let manifest = Manifest::from_json(r#"{
//!     "entries": [{
//!         "name": "database-design",
//!         "handler": "database-architect",
//!         "activation": {"phrases": ["database"]},
//!         "priority": 50,
//!         "entry_point": "registry/database-design/"
//!     }]
//! }"#)?;
//!
//! let outcome = select(
//!     "help me design the database schema",
//!     &manifest,
//!     &SelectOptions::default(),
//! );
//! assert!(outcome.matches().is_some());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod catalog;
pub mod config;
pub mod generate;
pub mod manifest;
pub mod scorer;
pub mod selector;
pub mod testing;
pub mod validate;

// Error types and utilities
mod error;

// Re-export key types for convenience
pub use manifest::{Activation, Manifest, RegistryEntry};
pub use scorer::{score, ScoringWeights};
pub use selector::{select, RankedMatch, RouteOutcome, SelectOptions, CLARIFICATION_MESSAGE};

// Error types
pub use error::{Result, TriageError};

// Re-export config types
pub use config::{load_config, ConfigLoader, LayoutConfig, RoutingConfig, TriageConfig};

// Re-export collaborator surfaces
pub use generate::{build_manifest, scaffold_metadata, write_manifest, GenerateReport, ScaffoldReport};
pub use validate::{validate_manifest, Finding, Severity, ValidationReport};
