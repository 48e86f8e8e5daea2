//! End-to-end scenario runs against an in-process mock JSON:API
//!
//! Each test starts its own server from the canned resource set, edited
//! where the test needs the live data to disagree with the fixtures.

mod common;

use common::*;
use idc_migration_verify::config::bundled_fixture_dir;
use idc_migration_verify::scenario::{self, ScenarioReport};
use idc_migration_verify::scenarios::{ExpectedGenre, Scenario};
use idc_migration_verify::{
    init_tracing, DiffCategory, FixtureSource, JsonApiClient, Stage, VerificationSuite, VerifyConfig,
    VerifyContext, VerifyError, VerifyResult,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Fixtures held in memory, for fixture content the bundle does not have
struct MemoryFixtures(HashMap<String, String>);

impl FixtureSource for MemoryFixtures {
    fn read(&self, name: &str) -> VerifyResult<String> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| VerifyError::FixtureNotFound {
                name: name.to_string(),
                path: name.into(),
            })
    }
}

fn bundled_fixture(name: &str) -> Value {
    let content = std::fs::read_to_string(bundled_fixture_dir().join(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn context_with_fixture(api: &MockJsonApi, name: &str, fixture: Value) -> VerifyContext {
    let client = JsonApiClient::new(&api.config()).unwrap();
    let fixtures = MemoryFixtures(HashMap::from([(name.to_string(), fixture.to_string())]));
    VerifyContext::with_fixtures(client, Arc::new(fixtures))
}

async fn run_against(resources: Vec<Value>, scenario: Scenario) -> ScenarioReport {
    init_tracing();
    let api = MockJsonApi::start(resources).await;
    scenario.run(&api.context()).await
}

#[tokio::test]
async fn test_catalogue_passes_against_canned_resources() {
    init_tracing();
    let api = MockJsonApi::start(canned_resources()).await;
    let mut suite = VerificationSuite::new(api.config()).unwrap();

    suite
        .wait_for_api(Duration::from_secs(10))
        .await
        .expect("Mock API did not become healthy");
    let reports = suite.run_all().await;
    assert_eq!(reports.len(), Scenario::ALL.len());

    suite.print_summary();
    for report in &suite.reports {
        assert!(report.passed(), "{}: {:?}", report.name, report.error);
        assert_eq!(report.reached, Stage::Passed);
    }
    assert!(suite.all_passed());
}

#[tokio::test]
async fn test_subset_run_appends_reports() {
    init_tracing();
    let api = MockJsonApi::start(canned_resources()).await;
    let mut suite = VerificationSuite::new(api.config()).unwrap();

    suite.run(&[Scenario::Genre]).await;
    suite.run(&[Scenario::Language, Scenario::Subject]).await;

    assert_eq!(suite.reports.len(), 3);
    assert!(suite.reports[0].name.starts_with("genre "));
    assert!(suite.all_passed());
}

#[tokio::test]
async fn test_missing_back_reference_fails_reciprocity() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, FAMILY_HINE)["relationships"]["field_relationships"]["data"] =
        json!([]);

    let report = run_against(resources, Scenario::Family).await;
    assert_eq!(report.reached, Stage::AttributesVerified);
    match report.error {
        Some(VerifyError::ReciprocityMismatch { target, .. }) => {
            assert!(target.contains(FAMILY_HINE), "{target}");
        }
        other => panic!("expected reciprocity mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_inverse_label_fails_reciprocity() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, CORPORATE_BODY_JHU)["relationships"]["field_relationships"]
        ["data"][0]["meta"]["rel_type"] = json!("schema:parentOrganization");

    let report = run_against(resources, Scenario::CorporateBody).await;
    match report.error {
        Some(VerifyError::ReciprocityMismatch { detail, .. }) => {
            assert!(detail.contains("schema:subOrganization"), "{detail}");
        }
        other => panic!("expected reciprocity mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_related_entity_of_another_id_is_rejected() {
    // the name lookup finds a family, but not the referenced one
    let mut resources = canned_resources();
    resource_mut(&mut resources, FAMILY_WICKES)["relationships"]["field_relationships"]["data"]
        [0]["id"] = json!(PERSON_HINE);

    let report = run_against(resources, Scenario::Family).await;
    match report.error {
        Some(VerifyError::FieldMismatch { differences, .. }) => {
            assert_eq!(differences.len(), 1);
            assert_eq!(differences[0].path, "id");
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_entity_fails_cardinality() {
    let mut resources = canned_resources();
    let mut duplicate = resource_mut(&mut resources, GENRE_MAPS).clone();
    duplicate["id"] = json!("00000000-0000-4000-8000-000000000099");
    resources.push(duplicate);

    let report = run_against(resources, Scenario::Genre).await;
    assert_eq!(report.reached, Stage::FixtureLoaded);
    match report.error {
        Some(VerifyError::Cardinality { url, found }) => {
            assert_eq!(found, 2);
            assert!(url.contains("/jsonapi/taxonomy_term/genre?filter%5Bname%5D=Maps"), "{url}");
        }
        other => panic!("expected cardinality error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_entity_fails_cardinality() {
    let mut resources = canned_resources();
    resources.retain(|r| r["id"] != GENRE_MAPS);

    let report = run_against(resources, Scenario::Genre).await;
    assert!(matches!(
        report.error,
        Some(VerifyError::Cardinality { found: 0, .. })
    ));
}

#[tokio::test]
async fn test_missing_relation_is_reported() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, PERSON_ADAMS)["relationships"]["field_relationships"]["data"] =
        json!([]);

    let report = run_against(resources, Scenario::Person1).await;
    assert_eq!(report.reached, Stage::AttributesVerified);
    match report.error {
        Some(VerifyError::RelationNotFound {
            field, rel_type, ..
        }) => {
            assert_eq!(field, "field_relationships");
            assert_eq!(rel_type, "schema:knows");
        }
        other => panic!("expected missing relation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_attribute_difference_is_reported() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, GEOLOCATION_BALTIMORE)["attributes"]["field_geo_alt_name"] =
        json!(["Mobtown", "Charm City"]);

    let report = run_against(resources, Scenario::Geolocation).await;
    assert_eq!(report.reached, Stage::LiveEntityFetched);
    match report.error {
        Some(VerifyError::FieldMismatch {
            subject,
            differences,
        }) => {
            assert_eq!(subject, "taxonomy_term--geo_location 'Baltimore'");
            let paths: Vec<_> = differences.iter().map(|d| d.path.as_str()).collect();
            assert_eq!(paths, vec!["geo_alt_name[0]", "geo_alt_name[1]"]);
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unordered_fields_ignore_order() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, PERSON_HINE)["attributes"]["field_date"] =
        json!(["1940-11-03", "1874-09-26"]);

    let report = run_against(resources, Scenario::Person2).await;
    assert!(report.passed(), "{:?}", report.error);
}

#[tokio::test]
async fn test_unordered_fields_still_count_values() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, CORPORATE_BODY_LIBRARIES)["attributes"]["field_date"] =
        json!(["1998", "1998"]);

    let report = run_against(resources, Scenario::CorporateBody).await;
    match report.error {
        Some(VerifyError::FieldMismatch { differences, .. }) => {
            assert_eq!(differences.len(), 1);
            assert_eq!(differences[0].category, DiffCategory::Extra);
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_language_code_of_alternative_title_is_checked() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, LANGUAGE_FRENCH)["attributes"]["field_language_code"] =
        json!("de");

    let report = run_against(resources, Scenario::Collection).await;
    assert_eq!(report.reached, Stage::AttributesVerified);
    match report.error {
        Some(VerifyError::FieldMismatch { differences, .. }) => {
            assert_eq!(differences.len(), 1);
            assert_eq!(differences[0].path, "field_alternative_title[0].lang_code");
            assert_eq!(differences[0].actual, "Some(\"de\")");
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_parent_collection_title_is_checked() {
    let mut resources = canned_resources();
    resource_mut(&mut resources, COLLECTION_SPECIAL)["attributes"]["title"] =
        json!("Rare Books");

    let report = run_against(resources, Scenario::Collection).await;
    match report.error {
        Some(VerifyError::FieldMismatch { differences, .. }) => {
            assert_eq!(differences[0].path, "field_member_of[0]");
            assert_eq!(differences[0].actual, "\"Rare Books\"");
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fixture_of_another_kind_is_rejected_before_any_request() {
    init_tracing();
    // no resources: any request would fail with a cardinality error
    let api = MockJsonApi::start(Vec::new()).await;
    let mut fixture = bundled_fixture("taxonomy-genre.json");
    fixture["bundle"] = json!("subject");
    let ctx = context_with_fixture(&api, "taxonomy-genre.json", fixture);

    let report = scenario::run::<ExpectedGenre>(&ctx, "taxonomy-genre.json").await;
    assert_eq!(report.reached, Stage::Pending);
    match report.error {
        Some(VerifyError::FixtureKind {
            expected, actual, ..
        }) => {
            assert_eq!(expected, "taxonomy_term--genre");
            assert_eq!(actual, "taxonomy_term--subject");
        }
        other => panic!("expected fixture kind error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_person_fixture_precondition() {
    init_tracing();
    let api = MockJsonApi::start(canned_resources()).await;
    let fixture = bundled_fixture("taxonomy-person-02.json");
    let ctx = context_with_fixture(&api, "taxonomy-person-01.json", fixture);

    let report = Scenario::Person1.run(&ctx).await;
    assert_eq!(report.reached, Stage::Pending);
    assert!(matches!(
        report.error,
        Some(VerifyError::FixturePrecondition { .. })
    ));
}

#[tokio::test]
async fn test_unexpected_status_is_reported() {
    init_tracing();
    let api = MockJsonApi::start(canned_resources()).await;
    let config = api.config().with_base_url(&format!("{}/missing", api.base_url));
    let ctx = VerifyContext::new(&config).unwrap();

    let report = Scenario::Genre.run(&ctx).await;
    match report.error {
        Some(VerifyError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_repository_is_a_transport_error() {
    init_tracing();
    let config = VerifyConfig::from_env()
        .with_base_url("http://127.0.0.1:9")
        .with_fixture_dir(bundled_fixture_dir());
    let ctx = VerifyContext::new(&config).unwrap();

    let report = Scenario::Genre.run(&ctx).await;
    assert_eq!(report.reached, Stage::FixtureLoaded);
    match report.error {
        Some(VerifyError::Transport { url, .. }) => {
            assert!(url.starts_with("http://127.0.0.1:9/jsonapi/taxonomy_term/genre"), "{url}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_unreachable_repository_times_out() {
    init_tracing();
    let config = VerifyConfig::from_env().with_base_url("http://127.0.0.1:9");
    let suite = VerificationSuite::new(config).unwrap();

    let result = suite.wait_for_api(Duration::from_millis(100)).await;
    assert!(matches!(result, Err(VerifyError::NotReady { .. })));
}

#[tokio::test]
async fn test_non_json_body_is_a_decode_error() {
    init_tracing();
    let api = MockJsonApi::start_with_body("<html><body>Service unavailable</body></html>").await;

    let report = Scenario::Genre.run(&api.context()).await;
    assert_eq!(report.reached, Stage::FixtureLoaded);
    assert!(matches!(report.error, Some(VerifyError::Decode { .. })));
}

#[tokio::test]
async fn test_envelope_without_data_is_a_decode_error() {
    init_tracing();
    let api = MockJsonApi::start_with_body(r#"{"jsonapi": {"version": "1.0"}, "links": {}}"#).await;

    let report = Scenario::Language.run(&api.context()).await;
    assert_eq!(report.reached, Stage::FixtureLoaded);
    match report.error {
        Some(VerifyError::Decode { url, .. }) => {
            assert!(url.contains("/jsonapi/taxonomy_term/language?"), "{url}");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_null_text_parts_in_live_data_are_compared() {
    // a null description format decodes, then differs from the fixture
    let mut resources = canned_resources();
    resource_mut(&mut resources, GENRE_MAPS)["attributes"]["description"]["format"] = json!(null);

    let report = run_against(resources, Scenario::Genre).await;
    assert_eq!(report.reached, Stage::LiveEntityFetched);
    match report.error {
        Some(VerifyError::FieldMismatch { differences, .. }) => {
            assert_eq!(differences.len(), 1);
            assert_eq!(differences[0].path, "description.format");
            assert_eq!(differences[0].actual, "\"\"");
        }
        other => panic!("expected field mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failures_leave_other_scenarios_unaffected() {
    init_tracing();
    let mut resources = canned_resources();
    resources.retain(|r| r["id"] != GENRE_MAPS);
    let api = MockJsonApi::start(resources).await;
    let mut suite = VerificationSuite::new(api.config()).unwrap();

    suite.run_all().await;
    suite.print_summary();

    let failed: Vec<_> = suite.reports.iter().filter(|r| !r.passed()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].name.starts_with("genre "));
    assert!(!suite.all_passed());
}
