//! Kind-specific attribute structures decoded from live resources
//!
//! Field names follow the platform's machine names; the Rust names drop
//! the `field_` prefix. Multi-valued fields that come back as `null`
//! decode as empty lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Formatted text: raw value, rendered HTML and text format
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub processed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
}

/// An authority record (source vocabulary + URI)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorityLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A plain link field value (uri + optional title)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkValue {
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Attributes shared by every taxonomy term
///
/// Access rights, copyright and use, genre, resource types and subject
/// terms carry nothing beyond these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TermAttributes {
    pub name: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(rename = "field_authority_link", default, deserialize_with = "null_as_empty")]
    pub authority: Vec<AuthorityLink>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonAttributes {
    #[serde(flatten)]
    pub term: TermAttributes,
    #[serde(rename = "field_primary_part_of_name", default)]
    pub primary_part_of_name: Option<String>,
    #[serde(rename = "field_preferred_name_rest", default, deserialize_with = "null_as_empty")]
    pub preferred_name_rest: Vec<String>,
    #[serde(rename = "field_preferred_name_prefix", default, deserialize_with = "null_as_empty")]
    pub preferred_name_prefix: Vec<String>,
    #[serde(rename = "field_preferred_name_suffix", default, deserialize_with = "null_as_empty")]
    pub preferred_name_suffix: Vec<String>,
    #[serde(rename = "field_preferred_name_number", default, deserialize_with = "null_as_empty")]
    pub preferred_name_number: Vec<String>,
    #[serde(rename = "field_person_alternate_name", default, deserialize_with = "null_as_empty")]
    pub alternate_name: Vec<String>,
    #[serde(rename = "field_date", default, deserialize_with = "null_as_empty")]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FamilyAttributes {
    #[serde(flatten)]
    pub term: TermAttributes,
    #[serde(rename = "field_title_and_other_words", default)]
    pub title: Option<String>,
    #[serde(rename = "field_family_name", default)]
    pub family_name: Option<String>,
    #[serde(rename = "field_date", default, deserialize_with = "null_as_empty")]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeolocationAttributes {
    #[serde(flatten)]
    pub term: TermAttributes,
    #[serde(rename = "field_geo_alt_name", default, deserialize_with = "null_as_empty")]
    pub geo_alt_name: Vec<String>,
    #[serde(rename = "field_broader", default, deserialize_with = "null_as_empty")]
    pub broader: Vec<LinkValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageAttributes {
    #[serde(flatten)]
    pub term: TermAttributes,
    #[serde(rename = "field_language_code", default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorporateBodyAttributes {
    #[serde(flatten)]
    pub term: TermAttributes,
    #[serde(rename = "field_primary_name", default)]
    pub primary_name: Option<String>,
    #[serde(rename = "field_date_of_meeting_or_treaty", default, deserialize_with = "null_as_empty")]
    pub date_of_meeting: Vec<String>,
    #[serde(rename = "field_location_of_meeting", default, deserialize_with = "null_as_empty")]
    pub location: Vec<String>,
    #[serde(rename = "field_num_of_section_or_meet", default, deserialize_with = "null_as_empty")]
    pub number_or_section: Vec<String>,
    #[serde(rename = "field_subordinate_name", default, deserialize_with = "null_as_empty")]
    pub subordinate_name: Vec<String>,
    #[serde(rename = "field_corporate_body_alternate_name", default, deserialize_with = "null_as_empty")]
    pub alternate_name: Vec<String>,
    #[serde(rename = "field_date", default, deserialize_with = "null_as_empty")]
    pub dates: Vec<String>,
}

/// Attributes of a collection node
///
/// Titles in other languages and descriptions are relationships to
/// language terms, not attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionAttributes {
    pub title: String,
    #[serde(rename = "field_collection_contact_email", default)]
    pub contact_email: Option<String>,
    #[serde(rename = "field_collection_contact_name", default)]
    pub contact_name: Option<String>,
    #[serde(rename = "field_collection_number", default, deserialize_with = "null_as_empty")]
    pub collection_number: Vec<String>,
}

/// Access to the common term attributes of any term kind
pub trait AsTerm {
    fn term(&self) -> &TermAttributes;
}

/// The attribute an entity is looked up by (`name` or `title`)
pub trait NaturalKey {
    fn natural_key(&self) -> &str;
}

impl AsTerm for TermAttributes {
    fn term(&self) -> &TermAttributes {
        self
    }
}

impl NaturalKey for TermAttributes {
    fn natural_key(&self) -> &str {
        &self.name
    }
}

impl NaturalKey for CollectionAttributes {
    fn natural_key(&self) -> &str {
        &self.title
    }
}

macro_rules! impl_as_term {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsTerm for $ty {
                fn term(&self) -> &TermAttributes {
                    &self.term
                }
            }

            impl NaturalKey for $ty {
                fn natural_key(&self) -> &str {
                    &self.term.name
                }
            }
        )*
    };
}

impl_as_term!(
    PersonAttributes,
    FamilyAttributes,
    GeolocationAttributes,
    LanguageAttributes,
    CorporateBodyAttributes,
);

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
