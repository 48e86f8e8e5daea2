//! Terms that carry only a name, a description and authority records

use crate::compare::FieldCheck;
use crate::expected::{ExpectedTerm, AUTHORITY_RECORDS};
use crate::scenario::Expectation;
use idc_jsonapi::{EntityKind, TermAttributes};
use serde::Deserialize;

macro_rules! simple_term {
    ($(#[$doc:meta])* $name:ident => $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub ExpectedTerm);

        impl Expectation for $name {
            type Attributes = TermAttributes;
            const KIND: EntityKind = $kind;

            fn declared_type(&self) -> (&str, &str) {
                (self.0.entity_type.as_str(), self.0.bundle.as_str())
            }

            fn natural_key(&self) -> &str {
                &self.0.name
            }

            fn compare(&self, actual: &TermAttributes, check: &mut FieldCheck) {
                self.0.compare(actual, Some(AUTHORITY_RECORDS), check);
            }
        }
    };
}

simple_term!(
    /// `taxonomy-accessrights.json`
    ExpectedAccessRights => EntityKind::AccessRights
);
simple_term!(
    /// `taxonomy-copyrightanduse.json`
    ExpectedCopyrightAndUse => EntityKind::CopyrightAndUse
);
simple_term!(ExpectedGenre => EntityKind::Genre);
simple_term!(ExpectedResourceType => EntityKind::ResourceType);
simple_term!(ExpectedSubject => EntityKind::Subject);
