//! Expected-state fixture documents shared by all term kinds

use crate::compare::FieldCheck;
use idc_jsonapi::{AuthorityLink, Description, TermAttributes};
use serde::Deserialize;

/// Number of authority records migrated for each non-person term
pub const AUTHORITY_RECORDS: usize = 2;

/// An expected authority record
///
/// Person fixtures name the source `type`; the others name it `source`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpectedAuthority {
    #[serde(alias = "type")]
    pub source: String,
    pub uri: String,
}

/// Fields every taxonomy term fixture carries
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedTerm {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub bundle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub authority: Vec<ExpectedAuthority>,
}

impl ExpectedTerm {
    /// Compare name, description and authority records
    ///
    /// `authorities` pins the number of authority records the live entity
    /// must carry, on top of matching the fixture's own count.
    pub fn compare(&self, actual: &TermAttributes, authorities: Option<usize>, check: &mut FieldCheck) {
        check.equal("name", self.name.as_str(), actual.name.as_str());
        compare_description(
            "description",
            self.description.as_ref(),
            actual.description.as_ref(),
            check,
        );
        compare_authority(&self.authority, &actual.authority, authorities, check);
    }
}

/// Formatted text: format, raw value and rendered HTML
pub fn compare_description(
    path: &str,
    expected: Option<&Description>,
    actual: Option<&Description>,
    check: &mut FieldCheck,
) {
    let Some(expected) = expected else {
        return;
    };
    let empty = Description::default();
    let actual = actual.unwrap_or(&empty);

    check.equal(&format!("{path}.format"), expected.format.as_str(), actual.format.as_str());
    if !expected.value.is_empty() {
        check.non_empty(&format!("{path}.value"), &actual.value);
    }
    check.equal(&format!("{path}.value"), expected.value.as_str(), actual.value.as_str());
    check.non_empty(&format!("{path}.processed"), &actual.processed);
    check.equal(
        &format!("{path}.processed"),
        expected.processed.as_str(),
        actual.processed.as_str(),
    );
}

/// Authority records compare positionally as (source, uri) pairs
pub fn compare_authority(
    expected: &[ExpectedAuthority],
    actual: &[AuthorityLink],
    required: Option<usize>,
    check: &mut FieldCheck,
) {
    if let Some(required) = required {
        check.count("authority[required]", required, actual.len());
    }
    check.count("authority", expected.len(), actual.len());
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        check.equal(&format!("authority[{i}].source"), e.source.as_str(), a.source.as_str());
        check.equal(&format!("authority[{i}].uri"), e.uri.as_str(), a.uri.as_str());
    }
}
