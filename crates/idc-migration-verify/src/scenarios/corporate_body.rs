//! Corporate body terms and their organisational relations

use crate::compare::FieldCheck;
use crate::error::VerifyResult;
use crate::expected::{ExpectedTerm, AUTHORITY_RECORDS};
use crate::resolve::{DeclaredRelation, Lookup, Resolver, TYPED_RELATIONS_FIELD};
use crate::scenario::Expectation;
use async_trait::async_trait;
use idc_jsonapi::{CorporateBodyAttributes, EntityKind, Resource, TermAttributes};
use serde::Deserialize;

/// One relation a corporate body fixture declares
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedRelation {
    /// Relation label, e.g. "schema:parentOrganization"
    pub rel: String,
    /// Name of the related entity
    pub name: String,
}

/// `taxonomy-corporatebody-*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedCorporateBody {
    #[serde(flatten)]
    pub term: ExpectedTerm,
    #[serde(default)]
    pub primary_name: Option<String>,
    #[serde(default)]
    pub date_of_meeting: Vec<String>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub number_or_section: Vec<String>,
    #[serde(default)]
    pub subordinate_name: Vec<String>,
    #[serde(default)]
    pub alt_name: Vec<String>,
    #[serde(default)]
    pub date: Vec<String>,
    #[serde(default)]
    pub relationship: Vec<ExpectedRelation>,
}

#[async_trait]
impl Expectation for ExpectedCorporateBody {
    type Attributes = CorporateBodyAttributes;
    const KIND: EntityKind = EntityKind::CorporateBody;

    fn declared_type(&self) -> (&str, &str) {
        (self.term.entity_type.as_str(), self.term.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.term.name
    }

    fn compare(&self, actual: &CorporateBodyAttributes, check: &mut FieldCheck) {
        self.term.compare(&actual.term, Some(AUTHORITY_RECORDS), check);
        check
            .equal("primary_name", &self.primary_name, &actual.primary_name)
            .unordered("date_of_meeting", &self.date_of_meeting, &actual.date_of_meeting)
            .unordered("location", &self.location, &actual.location)
            .unordered("number_or_section", &self.number_or_section, &actual.number_or_section)
            .unordered("subordinate_name", &self.subordinate_name, &actual.subordinate_name)
            .unordered("alternate_name", &self.alt_name, &actual.alternate_name)
            .unordered("date", &self.date, &actual.dates);
    }

    /// Relations are followed by UUID, and each target must name this body
    /// back under the inverse relation
    async fn verify_relationships(
        &self,
        subject: &str,
        live: &Resource<CorporateBodyAttributes>,
        resolver: &Resolver<'_>,
    ) -> VerifyResult<()> {
        let mut check = FieldCheck::new(subject);
        check.count(
            TYPED_RELATIONS_FIELD,
            self.relationship.len(),
            live.relationships.references(TYPED_RELATIONS_FIELD).len(),
        );
        check.finish()?;

        for (rel, names) in group_by_rel(&self.relationship) {
            let relation = DeclaredRelation {
                field: TYPED_RELATIONS_FIELD,
                rel_type: Some(rel),
                targets: names,
                lookup: Lookup::Id,
                reciprocal: true,
            };
            let _targets: Vec<Resource<TermAttributes>> =
                resolver.verify(subject, live, &relation).await?;
        }
        Ok(())
    }
}

/// Declared relations grouped by label, preserving first-seen order
fn group_by_rel(relations: &[ExpectedRelation]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for relation in relations {
        match groups.iter_mut().find(|(rel, _)| *rel == relation.rel) {
            Some((_, names)) => names.push(&relation.name),
            None => groups.push((&relation.rel, vec![&relation.name])),
        }
    }
    groups
}
