//! Relationship objects and resource linkage

use crate::type_id::EntityTypeId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Meta key carrying the typed-relation label (e.g. "schema:knows")
pub const META_REL_TYPE: &str = "rel_type";

/// Meta key carrying a language-tagged text value
pub const META_VALUE: &str = "value";

/// A resource identifier object: one edge of the live entity graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(rename = "type")]
    pub type_id: EntityTypeId,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Reference {
    /// The typed-relation label, if the reference carries one
    pub fn rel_type(&self) -> Option<&str> {
        self.meta_str(META_REL_TYPE)
    }

    /// The text value attached to a language-tagged reference
    pub fn value(&self) -> Option<&str> {
        self.meta_str(META_VALUE)
    }

    /// Ordering position within a multi-valued relationship, when the
    /// platform reports one
    pub fn position(&self) -> Option<u64> {
        self.meta.get("drupal_internal__target_id_delta").and_then(Value::as_u64)
    }

    /// Look up a string meta entry
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }
}

/// Resource linkage: empty, to-one or to-many
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    #[default]
    Empty,
    One(Reference),
    Many(Vec<Reference>),
}

impl Linkage {
    /// All references in linkage order
    pub fn references(&self) -> &[Reference] {
        match self {
            Linkage::Empty => &[],
            Linkage::One(reference) => std::slice::from_ref(reference),
            Linkage::Many(references) => references,
        }
    }

    pub fn len(&self) -> usize {
        self.references().len()
    }

    pub fn is_empty(&self) -> bool {
        self.references().is_empty()
    }
}

/// A relationship object (`{ "data": ..., "links": ... }`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, deserialize_with = "null_linkage")]
    pub data: Linkage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl Relationship {
    pub fn references(&self) -> &[Reference] {
        self.data.references()
    }

    /// References whose relation label matches `rel_type`
    pub fn with_rel_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a Reference> {
        self.references()
            .iter()
            .filter(move |r| r.rel_type() == Some(rel_type))
    }
}

fn null_linkage<'de, D>(deserializer: D) -> Result<Linkage, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Linkage>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `relationships` member of a resource, keyed by field name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationships(BTreeMap<String, Relationship>);

impl Relationships {
    /// Get a relationship by field name
    pub fn get(&self, field: &str) -> Option<&Relationship> {
        self.0.get(field)
    }

    /// References held by a field; an absent field has none
    pub fn references(&self, field: &str) -> &[Reference] {
        self.get(field).map(Relationship::references).unwrap_or(&[])
    }

    /// Field names present on the resource
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, relationship: Relationship) {
        self.0.insert(field.into(), relationship);
    }
}
