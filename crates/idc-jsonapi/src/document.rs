//! JSON:API top-level documents and resource objects

use crate::relationship::Relationships;
use crate::type_id::EntityTypeId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A collection response held the wrong number of primary resources
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("expected exactly {expected} resource(s) in `data`, found {found}")]
pub struct CardinalityError {
    pub expected: usize,
    pub found: usize,
}

/// A resource object with kind-specific attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub type_id: EntityTypeId,
    pub attributes: A,
    #[serde(default)]
    pub relationships: Relationships,
}

impl<A> Resource<A> {
    pub fn entity(&self) -> &str {
        self.type_id.entity()
    }

    pub fn bundle(&self) -> &str {
        self.type_id.bundle()
    }
}

/// Resource of an unknown or mixed type, attributes kept untyped
pub type RawResource = Resource<Value>;

/// The response envelope: `{ data: [...], included: [...] }`
///
/// `included` resources can be of any type, so their attributes stay as
/// raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<A> {
    pub data: Vec<Resource<A>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<RawResource>>,
}

impl<A> Document<A> {
    /// Take the only primary resource, failing unless there is exactly one
    pub fn single(self) -> Result<Resource<A>, CardinalityError> {
        let found = self.data.len();
        if found != 1 {
            return Err(CardinalityError { expected: 1, found });
        }
        let mut data = self.data;
        data.pop().ok_or(CardinalityError { expected: 1, found })
    }

    /// Look up an included resource by id
    pub fn included(&self, id: &str) -> Option<&RawResource> {
        self.included
            .as_deref()
            .and_then(|included| included.iter().find(|r| r.id == id))
    }
}

impl<A: DeserializeOwned> Document<A> {
    /// Decode a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
