//! Typed JSON:API documents for IDC entities
//!
//! This crate turns JSON:API response bodies from the IDC repository into
//! typed values: the composite `EntityTypeId`, resource objects with
//! kind-specific attributes, and relationship linkage. It does no network
//! or filesystem access.

pub mod attributes;
mod document;
mod kind;
mod relationship;
mod type_id;

pub use attributes::{
    AsTerm, AuthorityLink, CollectionAttributes, CorporateBodyAttributes, Description,
    FamilyAttributes, GeolocationAttributes, LanguageAttributes, LinkValue, NaturalKey,
    PersonAttributes, TermAttributes,
};
pub use document::{CardinalityError, Document, RawResource, Resource};
pub use kind::EntityKind;
pub use relationship::{Linkage, Reference, Relationship, Relationships, META_REL_TYPE, META_VALUE};
pub use type_id::{EntityTypeId, TypeIdError, TYPE_SEPARATOR};

/// Path prefix under which the platform serves JSON:API resources
pub const JSONAPI_PREFIX: &str = "jsonapi";
