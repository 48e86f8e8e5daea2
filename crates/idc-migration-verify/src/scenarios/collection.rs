//! Collection nodes
//!
//! Alternative titles and descriptions are stored as references to
//! language terms, with the text in the reference's `meta.value`. Each
//! reference is resolved to read the language code.

use crate::compare::FieldCheck;
use crate::error::{VerifyError, VerifyResult};
use crate::resolve::{DeclaredRelation, Lookup, Resolver};
use crate::scenario::Expectation;
use async_trait::async_trait;
use idc_jsonapi::{CollectionAttributes, EntityKind, Resource};
use serde::Deserialize;

pub const FIELD_TITLE_LANGUAGE: &str = "field_title_language";
pub const FIELD_ALTERNATIVE_TITLE: &str = "field_alternative_title";
pub const FIELD_DESCRIPTION: &str = "field_description";
pub const FIELD_MEMBER_OF: &str = "field_member_of";

/// Text tagged with the code of its language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LangValue {
    pub value: String,
    pub lang_code: String,
}

/// `collection-*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedCollection {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub bundle: String,
    pub title: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub collection_number: Vec<String>,
    #[serde(default)]
    pub title_lang_code: Option<String>,
    #[serde(default)]
    pub alt_title: Vec<LangValue>,
    #[serde(default)]
    pub description: Vec<LangValue>,
    /// Titles of the parent collections
    #[serde(default)]
    pub member_of: Vec<String>,
}

#[async_trait]
impl Expectation for ExpectedCollection {
    type Attributes = CollectionAttributes;
    const KIND: EntityKind = EntityKind::Collection;

    fn declared_type(&self) -> (&str, &str) {
        (self.entity_type.as_str(), self.bundle.as_str())
    }

    fn natural_key(&self) -> &str {
        &self.title
    }

    fn compare(&self, actual: &CollectionAttributes, check: &mut FieldCheck) {
        check
            .equal("title", self.title.as_str(), actual.title.as_str())
            .equal("contact_email", &self.contact_email, &actual.contact_email)
            .equal("contact_name", &self.contact_name, &actual.contact_name)
            .unordered("collection_number", &self.collection_number, &actual.collection_number);
    }

    async fn verify_relationships(
        &self,
        subject: &str,
        live: &Resource<CollectionAttributes>,
        resolver: &Resolver<'_>,
    ) -> VerifyResult<()> {
        let mut check = FieldCheck::new(subject);

        if let Some(expected_code) = &self.title_lang_code {
            let reference = match live.relationships.references(FIELD_TITLE_LANGUAGE) {
                [reference] => reference,
                [] => {
                    return Err(VerifyError::RelationNotFound {
                        subject: subject.to_string(),
                        field: FIELD_TITLE_LANGUAGE.to_string(),
                        rel_type: "(any)".to_string(),
                    })
                }
                many => {
                    check.count(FIELD_TITLE_LANGUAGE, 1, many.len());
                    return check.finish();
                }
            };
            check.equal(
                &format!("{FIELD_TITLE_LANGUAGE}.type"),
                &EntityKind::Language.type_id(),
                &reference.type_id,
            );
            let code = resolver.language_code(reference).await?;
            check.equal(
                &format!("{FIELD_TITLE_LANGUAGE}.lang_code"),
                &Some(expected_code),
                &code.as_ref(),
            );
        }

        verify_lang_values(resolver, live, FIELD_ALTERNATIVE_TITLE, &self.alt_title, &mut check)
            .await?;
        verify_lang_values(resolver, live, FIELD_DESCRIPTION, &self.description, &mut check)
            .await?;
        check.finish()?;

        let member_of = DeclaredRelation {
            field: FIELD_MEMBER_OF,
            rel_type: None,
            targets: self.member_of.iter().map(String::as_str).collect(),
            lookup: Lookup::Id,
            reciprocal: false,
        };
        let parents: Vec<Resource<CollectionAttributes>> =
            resolver.verify(subject, live, &member_of).await?;

        let mut check = FieldCheck::new(subject);
        for (i, parent) in parents.iter().enumerate() {
            check.equal(
                &format!("{FIELD_MEMBER_OF}[{i}].type"),
                &EntityKind::Collection.type_id(),
                &parent.type_id,
            );
        }
        check.finish()
    }
}

/// Compare language-tagged values positionally: text from the reference
/// meta, language code from the resolved language term
async fn verify_lang_values(
    resolver: &Resolver<'_>,
    live: &Resource<CollectionAttributes>,
    field: &str,
    expected: &[LangValue],
    check: &mut FieldCheck,
) -> VerifyResult<()> {
    let references = live.relationships.references(field);
    check.count(field, expected.len(), references.len());

    let language = EntityKind::Language.type_id();
    for (i, (e, reference)) in expected.iter().zip(references).enumerate() {
        check
            .equal(&format!("{field}[{i}].type"), &language, &reference.type_id)
            .equal(
                &format!("{field}[{i}].value"),
                &Some(e.value.as_str()),
                &reference.value(),
            );
        let code = resolver.language_code(reference).await?;
        check.equal(
            &format!("{field}[{i}].lang_code"),
            &Some(e.lang_code.as_str()),
            &code.as_deref(),
        );
    }
    Ok(())
}
