//! Person terms
//!
//! Name parts and dates compare as multisets. `schema:knows` targets are
//! looked up again by name.

use crate::compare::FieldCheck;
use crate::error::VerifyResult;
use crate::expected::ExpectedTerm;
use crate::resolve::{DeclaredRelation, Lookup, Resolver, TYPED_RELATIONS_FIELD};
use crate::scenario::Expectation;
use async_trait::async_trait;
use idc_jsonapi::{EntityKind, PersonAttributes, Resource};
use serde::Deserialize;

pub const REL_KNOWS: &str = "schema:knows";

/// `taxonomy-person-*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedPerson {
    #[serde(flatten)]
    pub term: ExpectedTerm,
    #[serde(default)]
    pub primary_name: Option<String>,
    #[serde(default)]
    pub rest_of_name: Vec<String>,
    #[serde(default)]
    pub prefix: Vec<String>,
    #[serde(default)]
    pub suffix: Vec<String>,
    #[serde(default)]
    pub number: Vec<String>,
    #[serde(default)]
    pub alt_name: Vec<String>,
    #[serde(default)]
    pub date: Vec<String>,
    /// Names of the people this person knows
    #[serde(default)]
    pub knows: Vec<String>,
}

#[async_trait]
impl Expectation for ExpectedPerson {
    type Attributes = PersonAttributes;
    const KIND: EntityKind = EntityKind::Person;

    fn declared_type(&self) -> (&str, &str) {
        (self.term.entity_type.as_str(), self.term.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.term.name
    }

    fn compare(&self, actual: &PersonAttributes, check: &mut FieldCheck) {
        // the person migration does not pin the number of authority records
        self.term.compare(&actual.term, None, check);
        check
            .equal(
                "primary_part_of_name",
                &self.primary_name,
                &actual.primary_part_of_name,
            )
            .unordered("preferred_name_rest", &self.rest_of_name, &actual.preferred_name_rest)
            .unordered("preferred_name_prefix", &self.prefix, &actual.preferred_name_prefix)
            .unordered("preferred_name_suffix", &self.suffix, &actual.preferred_name_suffix)
            .unordered("preferred_name_number", &self.number, &actual.preferred_name_number)
            .unordered("alternate_name", &self.alt_name, &actual.alternate_name)
            .unordered("date", &self.date, &actual.dates);
    }

    async fn verify_relationships(
        &self,
        subject: &str,
        live: &Resource<PersonAttributes>,
        resolver: &Resolver<'_>,
    ) -> VerifyResult<()> {
        let relation = DeclaredRelation {
            field: TYPED_RELATIONS_FIELD,
            rel_type: Some(REL_KNOWS),
            targets: self.knows.iter().map(String::as_str).collect(),
            lookup: Lookup::NaturalKey(EntityKind::Person.natural_key()),
            reciprocal: false,
        };

        let known: Vec<Resource<PersonAttributes>> =
            resolver.verify(subject, live, &relation).await?;

        let mut check = FieldCheck::new(subject);
        for (i, person) in known.iter().enumerate() {
            check
                .equal(&format!("{REL_KNOWS}[{i}].type.entity"), "taxonomy_term", person.entity())
                .equal(&format!("{REL_KNOWS}[{i}].type.bundle"), "person", person.bundle());
        }
        check.finish()
    }
}

/// Person fixtures are paired with the rest of the name they describe
pub fn check_rest_of_name(expected: &ExpectedPerson, rest_of_name: &str) -> Result<(), String> {
    match expected.rest_of_name.first() {
        Some(first) if first == rest_of_name => Ok(()),
        other => Err(format!(
            "first rest_of_name is {other:?}, expected {rest_of_name:?}"
        )),
    }
}
