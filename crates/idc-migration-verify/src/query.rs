//! Filtered collection queries against the JSON:API

use crate::client::JsonApiClient;
use crate::error::{VerifyError, VerifyResult};
use idc_jsonapi::{Document, EntityKind, EntityTypeId, Resource, JSONAPI_PREFIX};
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Filter field matching a resource's UUID
pub const ID_FILTER: &str = "id";

/// `GET {base}/jsonapi/{entity}/{bundle}?filter[{field}]={value}`
///
/// The value can be changed between fetches to re-query the same
/// collection, e.g. to look up a related entity by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiQuery {
    type_id: EntityTypeId,
    filter: String,
    value: String,
}

impl JsonApiQuery {
    pub fn new(type_id: EntityTypeId, filter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_id,
            filter: filter.into(),
            value: value.into(),
        }
    }

    /// Look up an entity of `kind` by its natural key
    pub fn natural_key(kind: EntityKind, value: impl Into<String>) -> Self {
        Self::new(kind.type_id(), kind.natural_key(), value)
    }

    /// Look up a resource by UUID
    pub fn by_id(type_id: EntityTypeId, id: impl Into<String>) -> Self {
        Self::new(type_id, ID_FILTER, id)
    }

    pub fn type_id(&self) -> &EntityTypeId {
        &self.type_id
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Build the request URL against `base_url`
    pub fn url(&self, base_url: &str) -> VerifyResult<Url> {
        let invalid = |reason: String| VerifyError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend([JSONAPI_PREFIX, self.type_id.entity(), self.type_id.bundle()]);
        url.query_pairs_mut()
            .clear()
            .append_pair(&format!("filter[{}]", self.filter), &self.value);

        Ok(url)
    }

    /// Fetch the whole document
    pub async fn fetch<A: DeserializeOwned>(
        &self,
        client: &JsonApiClient,
    ) -> VerifyResult<Document<A>> {
        let url = self.url(client.base_url())?;
        client.get_document(&url).await
    }

    /// Fetch the one resource this query must match
    pub async fn fetch_one<A: DeserializeOwned>(
        &self,
        client: &JsonApiClient,
    ) -> VerifyResult<Resource<A>> {
        let url = self.url(client.base_url())?;
        let document: Document<A> = client.get_document(&url).await?;
        document.single().map_err(|e| VerifyError::Cardinality {
            url: url.to_string(),
            found: e.found,
        })
    }
}
