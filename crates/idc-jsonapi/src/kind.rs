//! Catalogue of the entity kinds that migrations produce

use crate::type_id::EntityTypeId;
use std::fmt;

/// Entity kinds verified after a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    AccessRights,
    CopyrightAndUse,
    Family,
    Genre,
    Geolocation,
    ResourceType,
    Subject,
    Language,
    CorporateBody,
    Collection,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Person,
        EntityKind::AccessRights,
        EntityKind::CopyrightAndUse,
        EntityKind::Family,
        EntityKind::Genre,
        EntityKind::Geolocation,
        EntityKind::ResourceType,
        EntityKind::Subject,
        EntityKind::Language,
        EntityKind::CorporateBody,
        EntityKind::Collection,
    ];

    /// Platform entity kind (e.g., "taxonomy_term")
    pub fn entity(self) -> &'static str {
        match self {
            EntityKind::Collection => "node",
            _ => "taxonomy_term",
        }
    }

    /// Platform bundle machine name
    pub fn bundle(self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::AccessRights => "access_rights",
            EntityKind::CopyrightAndUse => "copyright_and_use",
            EntityKind::Family => "family",
            EntityKind::Genre => "genre",
            EntityKind::Geolocation => "geo_location",
            EntityKind::ResourceType => "resource_types",
            EntityKind::Subject => "subject",
            EntityKind::Language => "language",
            EntityKind::CorporateBody => "corporate_body",
            EntityKind::Collection => "collection_object",
        }
    }

    /// The resource type served by the JSON:API for this kind
    pub fn type_id(self) -> EntityTypeId {
        EntityTypeId::new(self.entity(), self.bundle())
            .expect("entity kind catalogue holds valid type ids")
    }

    /// Attribute used as the natural key when looking an entity up
    pub fn natural_key(self) -> &'static str {
        match self {
            EntityKind::Collection => "title",
            _ => "name",
        }
    }

    /// Find the kind served under the given type, if it is one we verify
    pub fn from_type_id(type_id: &EntityTypeId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| type_id.is(kind.entity(), kind.bundle()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.entity(), self.bundle())
    }
}
