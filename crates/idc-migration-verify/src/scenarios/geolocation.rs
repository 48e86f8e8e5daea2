//! Geolocation terms
//!
//! Alternate names and broader places are positional.

use crate::compare::FieldCheck;
use crate::expected::{ExpectedTerm, AUTHORITY_RECORDS};
use crate::scenario::Expectation;
use idc_jsonapi::{EntityKind, GeolocationAttributes, LinkValue};
use serde::Deserialize;

/// Number of alternate names the geolocation migration carries
pub const GEO_ALT_NAMES: usize = 2;

/// `taxonomy-geolocation.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedGeolocation {
    #[serde(flatten)]
    pub term: ExpectedTerm,
    #[serde(default)]
    pub geo_alt_name: Vec<String>,
    #[serde(default)]
    pub broader: Vec<LinkValue>,
}

impl Expectation for ExpectedGeolocation {
    type Attributes = GeolocationAttributes;
    const KIND: EntityKind = EntityKind::Geolocation;

    fn declared_type(&self) -> (&str, &str) {
        (self.term.entity_type.as_str(), self.term.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.term.name
    }

    fn compare(&self, actual: &GeolocationAttributes, check: &mut FieldCheck) {
        self.term.compare(&actual.term, Some(AUTHORITY_RECORDS), check);
        check
            .count("geo_alt_name[required]", GEO_ALT_NAMES, actual.geo_alt_name.len())
            .ordered("geo_alt_name", &self.geo_alt_name, &actual.geo_alt_name)
            .count("broader", self.broader.len(), actual.broader.len());
        for (i, (e, a)) in self.broader.iter().zip(&actual.broader).enumerate() {
            check
                .equal(&format!("broader[{i}].title"), &e.title, &a.title)
                .equal(&format!("broader[{i}].uri"), e.uri.as_str(), a.uri.as_str());
        }
    }
}
