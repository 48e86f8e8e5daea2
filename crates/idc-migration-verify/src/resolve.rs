//! Relationship resolution
//!
//! A relationship reference is followed by issuing a fresh query for its
//! target. Traversal is a fixed sequence of explicit fetches, never
//! open-ended recursion. Every fetch checks the resolver's depth against
//! `MAX_DEPTH` before any request is made; reciprocity reads the
//! references of a target already fetched and costs no extra hop.

use crate::client::JsonApiClient;
use crate::compare::FieldCheck;
use crate::error::{VerifyError, VerifyResult};
use crate::query::JsonApiQuery;
use idc_jsonapi::{LanguageAttributes, NaturalKey, Reference, Relationships, Resource};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Deepest hop fetched from a scenario's root entity
pub const MAX_DEPTH: usize = 2;

/// Relationship field holding typed relations between agents
pub const TYPED_RELATIONS_FIELD: &str = "field_relationships";

/// Inverse of a typed relation, for relations whose inverse is known
pub fn inverse_relation(rel_type: &str) -> Option<&'static str> {
    match rel_type {
        "schema:parentOrganization" => Some("schema:subOrganization"),
        "schema:subOrganization" => Some("schema:parentOrganization"),
        "schema:knowsAbout" => Some("schema:knowsAbout"),
        "schema:knows" => Some("schema:knows"),
        _ => None,
    }
}

/// How a reference's target is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Re-query by the expected value of the given attribute, then check the
    /// result is the referenced entity
    NaturalKey(&'static str),
    /// Query the referenced UUID directly
    Id,
}

/// A relation declared by a fixture
#[derive(Debug, Clone)]
pub struct DeclaredRelation<'e> {
    /// Relationship field on the live resource
    pub field: &'static str,
    /// Expected relation label; `None` for untyped entity references
    pub rel_type: Option<&'e str>,
    /// Expected natural key of each target, in order
    pub targets: Vec<&'e str>,
    pub lookup: Lookup,
    /// Also require each target to point back at the source
    pub reciprocal: bool,
}

/// Follows relationship references with a bounded depth
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    client: &'a JsonApiClient,
    depth: usize,
}

impl<'a> Resolver<'a> {
    /// A resolver for relations of a scenario's root entity
    pub fn new(client: &'a JsonApiClient) -> Self {
        Self { client, depth: 0 }
    }

    /// References in `field` carrying the expected relation label
    ///
    /// Fails when the relation is absent: the fixture expects a relation
    /// the live data does not have.
    pub fn find<'r>(
        &self,
        subject: &str,
        relationships: &'r Relationships,
        field: &str,
        rel_type: Option<&str>,
    ) -> VerifyResult<Vec<&'r Reference>> {
        let found: Vec<&Reference> = relationships
            .references(field)
            .iter()
            .filter(|r| rel_type.map_or(true, |rel| r.rel_type() == Some(rel)))
            .collect();

        if found.is_empty() {
            return Err(VerifyError::RelationNotFound {
                subject: subject.to_string(),
                field: field.to_string(),
                rel_type: rel_type.unwrap_or("(any)").to_string(),
            });
        }
        Ok(found)
    }

    /// Fetch a reference's target by UUID
    pub async fn by_id<A: DeserializeOwned>(&self, reference: &Reference) -> VerifyResult<Resource<A>> {
        self.check_depth()?;
        debug!(
            "Resolving {} {} at depth {}",
            reference.type_id,
            reference.id,
            self.depth + 1
        );
        JsonApiQuery::by_id(reference.type_id.clone(), &reference.id)
            .fetch_one(self.client)
            .await
    }

    /// Fetch a reference's target by natural key, then require the entity
    /// found to be the one referenced
    pub async fn by_natural_key<A: DeserializeOwned>(
        &self,
        reference: &Reference,
        filter: &str,
        value: &str,
    ) -> VerifyResult<Resource<A>> {
        self.check_depth()?;
        debug!(
            "Resolving {} by {} = {:?} at depth {}",
            reference.type_id,
            filter,
            value,
            self.depth + 1
        );
        let target: Resource<A> = JsonApiQuery::new(reference.type_id.clone(), filter, value)
            .fetch_one(self.client)
            .await?;

        let mut check = FieldCheck::new(format!("{} '{}'", reference.type_id, value));
        check
            .equal("type", &reference.type_id, &target.type_id)
            .equal("id", &reference.id, &target.id);
        check.finish()?;
        Ok(target)
    }

    /// Language code of a referenced language term
    pub async fn language_code(&self, reference: &Reference) -> VerifyResult<Option<String>> {
        let language: Resource<LanguageAttributes> = self.by_id(reference).await?;
        Ok(language.attributes.language_code)
    }

    /// Require `target` to reference `source_id` back, labelled `inverse`
    pub fn check_reciprocal<A>(
        &self,
        subject: &str,
        source_id: &str,
        target: &Resource<A>,
        field: &str,
        inverse: Option<&str>,
    ) -> VerifyResult<()> {
        let mismatch = |detail: String| VerifyError::ReciprocityMismatch {
            subject: subject.to_string(),
            target: format!("{} {}", target.type_id, target.id),
            detail,
        };

        let back = target
            .relationships
            .references(field)
            .iter()
            .find(|r| r.id == source_id)
            .ok_or_else(|| mismatch(format!("no reference to {source_id} in '{field}'")))?;

        if let Some(inverse) = inverse {
            if back.rel_type() != Some(inverse) {
                return Err(mismatch(format!(
                    "back-reference labelled {:?}, expected {:?}",
                    back.rel_type(),
                    inverse
                )));
            }
        }
        Ok(())
    }

    /// Resolve every target of a declared relation and verify it
    ///
    /// The live relation must hold exactly as many references as the fixture
    /// declares targets. Each resolved target's natural key must equal the
    /// declared value, and reciprocal relations must point back at `source`.
    pub async fn verify<S, A>(
        &self,
        subject: &str,
        source: &Resource<S>,
        relation: &DeclaredRelation<'_>,
    ) -> VerifyResult<Vec<Resource<A>>>
    where
        A: DeserializeOwned + NaturalKey,
    {
        if relation.targets.is_empty() {
            return Ok(Vec::new());
        }

        let references = self.find(
            subject,
            &source.relationships,
            relation.field,
            relation.rel_type,
        )?;

        let path = match relation.rel_type {
            Some(rel) => format!("{}[{}]", relation.field, rel),
            None => relation.field.to_string(),
        };
        let mut check = FieldCheck::new(subject);
        check.count(&path, relation.targets.len(), references.len());
        check.finish()?;

        let mut resolved = Vec::with_capacity(references.len());
        for (i, (reference, expected)) in references.iter().zip(&relation.targets).enumerate() {
            let target: Resource<A> = match relation.lookup {
                Lookup::NaturalKey(filter) => self.by_natural_key(reference, filter, expected).await?,
                Lookup::Id => self.by_id(reference).await?,
            };

            let mut check = FieldCheck::new(subject);
            check.equal(&format!("{path}[{i}]"), *expected, target.attributes.natural_key());
            check.finish()?;

            if relation.reciprocal {
                let inverse = relation.rel_type.and_then(inverse_relation);
                self.check_reciprocal(subject, &source.id, &target, relation.field, inverse)?;
            }
            resolved.push(target);
        }

        Ok(resolved)
    }

    fn check_depth(&self) -> VerifyResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(VerifyError::TraversalDepth { max: MAX_DEPTH });
        }
        Ok(())
    }
}
