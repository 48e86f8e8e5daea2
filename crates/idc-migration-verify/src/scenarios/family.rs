//! Family terms

use crate::compare::FieldCheck;
use crate::error::VerifyResult;
use crate::expected::{ExpectedTerm, AUTHORITY_RECORDS};
use crate::resolve::{DeclaredRelation, Lookup, Resolver, TYPED_RELATIONS_FIELD};
use crate::scenario::Expectation;
use async_trait::async_trait;
use idc_jsonapi::{EntityKind, FamilyAttributes, Resource};
use serde::Deserialize;

pub const REL_KNOWS_ABOUT: &str = "schema:knowsAbout";

/// Families carry a start and an end date, in that order
pub const FAMILY_DATES: usize = 2;

/// `taxonomy-family-*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedFamily {
    #[serde(flatten)]
    pub term: ExpectedTerm,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub date: Vec<String>,
    /// Names of families this family knows about; the relation is symmetric
    #[serde(default)]
    pub knows_about: Vec<String>,
}

#[async_trait]
impl Expectation for ExpectedFamily {
    type Attributes = FamilyAttributes;
    const KIND: EntityKind = EntityKind::Family;

    fn declared_type(&self) -> (&str, &str) {
        (self.term.entity_type.as_str(), self.term.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.term.name
    }

    fn compare(&self, actual: &FamilyAttributes, check: &mut FieldCheck) {
        self.term.compare(&actual.term, Some(AUTHORITY_RECORDS), check);
        check
            .equal("title", &self.title, &actual.title)
            .equal("family_name", &self.family_name, &actual.family_name)
            .count("date[required]", FAMILY_DATES, self.date.len())
            .ordered("date", &self.date, &actual.dates);
    }

    async fn verify_relationships(
        &self,
        subject: &str,
        live: &Resource<FamilyAttributes>,
        resolver: &Resolver<'_>,
    ) -> VerifyResult<()> {
        let relation = DeclaredRelation {
            field: TYPED_RELATIONS_FIELD,
            rel_type: Some(REL_KNOWS_ABOUT),
            targets: self.knows_about.iter().map(String::as_str).collect(),
            lookup: Lookup::NaturalKey(EntityKind::Family.natural_key()),
            reciprocal: true,
        };

        let related: Vec<Resource<FamilyAttributes>> =
            resolver.verify(subject, live, &relation).await?;

        let mut check = FieldCheck::new(subject);
        for (i, family) in related.iter().enumerate() {
            check.equal(
                &format!("{REL_KNOWS_ABOUT}[{i}].type"),
                &EntityKind::Family.type_id(),
                &family.type_id,
            );
        }
        check.finish()
    }
}
