//! Language terms

use crate::compare::FieldCheck;
use crate::expected::{ExpectedTerm, AUTHORITY_RECORDS};
use crate::scenario::Expectation;
use idc_jsonapi::{EntityKind, LanguageAttributes};
use serde::Deserialize;

/// `taxonomy-language.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedLanguage {
    #[serde(flatten)]
    pub term: ExpectedTerm,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl Expectation for ExpectedLanguage {
    type Attributes = LanguageAttributes;
    const KIND: EntityKind = EntityKind::Language;

    fn declared_type(&self) -> (&str, &str) {
        (self.term.entity_type.as_str(), self.term.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.term.name
    }

    fn compare(&self, actual: &LanguageAttributes, check: &mut FieldCheck) {
        self.term.compare(&actual.term, Some(AUTHORITY_RECORDS), check);
        check.equal("language_code", &self.language_code, &actual.language_code);
    }
}
