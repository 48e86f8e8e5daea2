//! Error types for migration verification
//!
//! Every variant is fatal to the scenario that raised it. Nothing is
//! retried, and other scenarios are unaffected.

use crate::compare::Difference;
use idc_jsonapi::TypeIdError;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur while verifying migrated entities
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Request could not be completed
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with something other than 200
    #[error("{status} status encountered when requesting {url}")]
    Status { url: String, status: StatusCode },

    /// Response body is not the expected JSON:API document
    #[error("error decoding JSON:API response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lookup that must match one resource matched zero or several
    #[error("exactly one JSON:API data element is expected from {url}, but found {found} element(s)")]
    Cardinality { url: String, found: usize },

    /// Fixture declares a relation the live entity does not carry
    #[error("{subject}: no '{rel_type}' relation found in '{field}'")]
    RelationNotFound {
        subject: String,
        field: String,
        rel_type: String,
    },

    /// Related entity does not point back at its source
    #[error("{subject} -> {target}: reciprocal relationship mismatch: {detail}")]
    ReciprocityMismatch {
        subject: String,
        target: String,
        detail: String,
    },

    /// Live values differ from the fixture
    #[error("{subject}: {} field(s) differ from the fixture:\n{}", .differences.len(), render(.differences))]
    FieldMismatch {
        subject: String,
        differences: Vec<Difference>,
    },

    /// Fixture describes a different entity kind than the scenario verifies
    #[error("fixture {fixture} declares {actual}, expected {expected}")]
    FixtureKind {
        fixture: String,
        expected: String,
        actual: String,
    },

    /// Fixture content fails a scenario precondition
    #[error("fixture {fixture} failed precondition: {reason}")]
    FixturePrecondition { fixture: String, reason: String },

    /// Fixture names are flat file names
    #[error("fixture name '{name}' must not contain path components")]
    FixtureName { name: String },

    #[error("fixture {name} not found at {path}")]
    FixtureNotFound { name: String, path: PathBuf },

    #[error("failed to read fixture {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding the content of fixture {name} as JSON: {source}")]
    FixtureParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    InvalidTypeId(#[from] TypeIdError),

    /// Relationship traversal went deeper than allowed
    #[error("relationship traversal exceeded maximum depth of {max}")]
    TraversalDepth { max: usize },

    /// Repository did not answer before the readiness wait ran out
    #[error("JSON:API at {url} did not become healthy within {timeout:?}")]
    NotReady { url: String, timeout: Duration },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

fn render(differences: &[Difference]) -> String {
    differences
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}
