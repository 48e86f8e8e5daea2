//! Canned live resources and their ids

use serde_json::Value;
use std::path::Path;

pub const PERSON_ADAMS: &str = "00000000-0000-4000-8000-000000000001";
pub const PERSON_HINE: &str = "00000000-0000-4000-8000-000000000002";
pub const GENRE_MAPS: &str = "00000000-0000-4000-8000-000000000007";
pub const GEOLOCATION_BALTIMORE: &str = "00000000-0000-4000-8000-000000000008";
pub const FAMILY_WICKES: &str = "00000000-0000-4000-8000-000000000005";
pub const FAMILY_HINE: &str = "00000000-0000-4000-8000-000000000006";
pub const LANGUAGE_FRENCH: &str = "00000000-0000-4000-8000-000000000012";
pub const CORPORATE_BODY_JHU: &str = "00000000-0000-4000-8000-000000000013";
pub const CORPORATE_BODY_LIBRARIES: &str = "00000000-0000-4000-8000-000000000014";
pub const COLLECTION_SPECIAL: &str = "00000000-0000-4000-8000-000000000015";

/// Load the canned resource set from `tests/fixtures/jsonapi/resources.json`
pub fn canned_resources() -> Vec<Value> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("jsonapi")
        .join("resources.json");

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load resources from {:?}: {}", path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse resources from {:?}: {}", path, e))
}

/// The canned resource with the given id
pub fn resource_mut<'a>(resources: &'a mut [Value], id: &str) -> &'a mut Value {
    resources
        .iter_mut()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no canned resource with id {id}"))
}
