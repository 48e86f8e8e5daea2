//! Entity type identifier representing an entity--bundle pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the entity kind and the bundle
pub const TYPE_SEPARATOR: &str = "--";

/// Error type for invalid type identifiers
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeIdError {
    #[error("type '{0}' must contain exactly one '--' separator")]
    InvalidFormat(String),

    #[error("entity kind cannot be empty")]
    EmptyEntity,

    #[error("bundle cannot be empty")]
    EmptyBundle,
}

/// A JSON:API resource type (e.g., "taxonomy_term--person")
///
/// The platform packs the entity kind and its bundle into a single string.
/// Both halves are validated once on construction, so `entity()` and
/// `bundle()` never have to split strings again at the use site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityTypeId {
    entity: String,
    bundle: String,
}

impl EntityTypeId {
    /// Create a new EntityTypeId from entity kind and bundle parts
    pub fn new(entity: impl Into<String>, bundle: impl Into<String>) -> Result<Self, TypeIdError> {
        let entity = entity.into();
        let bundle = bundle.into();

        if entity.is_empty() {
            return Err(TypeIdError::EmptyEntity);
        }
        if bundle.is_empty() {
            return Err(TypeIdError::EmptyBundle);
        }
        if entity.contains(TYPE_SEPARATOR) || bundle.contains(TYPE_SEPARATOR) {
            return Err(TypeIdError::InvalidFormat(format!(
                "{entity}{TYPE_SEPARATOR}{bundle}"
            )));
        }

        Ok(Self { entity, bundle })
    }

    /// Get the entity kind (e.g., "taxonomy_term", "node")
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Get the bundle (e.g., "person", "collection_object")
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Check whether this type matches the given entity kind and bundle
    pub fn is(&self, entity: &str, bundle: &str) -> bool {
        self.entity == entity && self.bundle == bundle
    }
}

impl FromStr for EntityTypeId {
    type Err = TypeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(TYPE_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(TypeIdError::InvalidFormat(s.to_string()));
        }
        Self::new(parts[0], parts[1])
    }
}

impl TryFrom<String> for EntityTypeId {
    type Error = TypeIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityTypeId> for String {
    fn from(id: EntityTypeId) -> String {
        id.to_string()
    }
}

impl fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.entity, TYPE_SEPARATOR, self.bundle)
    }
}
