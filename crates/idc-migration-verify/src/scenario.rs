//! Verification scenarios
//!
//! A scenario moves through `FixtureLoaded -> LiveEntityFetched ->
//! AttributesVerified -> RelationshipsResolved -> Passed`. The first
//! failure stops it; the report records the last stage reached and the
//! error.

use crate::client::JsonApiClient;
use crate::compare::FieldCheck;
use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::fixture::{load_fixture, DirFixtures, FixtureSource};
use crate::query::JsonApiQuery;
use crate::resolve::Resolver;
use async_trait::async_trait;
use idc_jsonapi::{EntityKind, NaturalKey, Resource};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Progress of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Pending,
    FixtureLoaded,
    LiveEntityFetched,
    AttributesVerified,
    RelationshipsResolved,
    Passed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::FixtureLoaded => "fixture loaded",
            Stage::LiveEntityFetched => "live entity fetched",
            Stage::AttributesVerified => "attributes verified",
            Stage::RelationshipsResolved => "relationships resolved",
            Stage::Passed => "passed",
        };
        f.write_str(name)
    }
}

/// Outcome of one scenario run
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub fixture: String,
    pub reached: Stage,
    pub error: Option<VerifyError>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.reached == Stage::Passed
    }

    /// Turn the report into a test result
    pub fn into_result(self) -> VerifyResult<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Print a summary of the run
    pub fn print_summary(&self) {
        match &self.error {
            None => println!("✅ {} - PASS", self.name),
            Some(e) => {
                println!("❌ {} - FAIL after '{}'", self.name, self.reached);
                for line in e.to_string().lines() {
                    println!("   {line}");
                }
            }
        }
    }
}

/// Everything a scenario needs: an API client and a fixture store
#[derive(Clone)]
pub struct VerifyContext {
    client: JsonApiClient,
    fixtures: Arc<dyn FixtureSource>,
}

impl VerifyContext {
    /// Build a context from configuration
    pub fn new(config: &VerifyConfig) -> VerifyResult<Self> {
        let client = JsonApiClient::new(config)?;
        Ok(Self::with_fixtures(
            client,
            Arc::new(DirFixtures::new(&config.fixture_dir)),
        ))
    }

    pub fn with_fixtures(client: JsonApiClient, fixtures: Arc<dyn FixtureSource>) -> Self {
        Self { client, fixtures }
    }

    pub fn client(&self) -> &JsonApiClient {
        &self.client
    }

    pub fn fixtures(&self) -> &dyn FixtureSource {
        self.fixtures.as_ref()
    }
}

/// An expected-state fixture and how to check its live counterpart
#[async_trait]
pub trait Expectation: DeserializeOwned + Send + Sync {
    /// Attributes of the live entity
    type Attributes: DeserializeOwned + NaturalKey + Send + Sync;

    /// Kind this fixture describes
    const KIND: EntityKind;

    /// The (entity kind, bundle) pair the fixture declares
    fn declared_type(&self) -> (&str, &str);

    /// Value of the kind's natural key (`name` or `title`)
    fn natural_key(&self) -> &str;

    /// Compare every declared attribute
    fn compare(&self, actual: &Self::Attributes, check: &mut FieldCheck);

    /// Resolve and verify declared relations; nothing by default
    async fn verify_relationships(
        &self,
        _subject: &str,
        _live: &Resource<Self::Attributes>,
        _resolver: &Resolver<'_>,
    ) -> VerifyResult<()> {
        Ok(())
    }
}

/// Run a scenario for fixture `fixture`
pub async fn run<E: Expectation>(ctx: &VerifyContext, fixture: &str) -> ScenarioReport {
    run_with::<E, _>(ctx, fixture, |_| Ok(())).await
}

/// Run a scenario, checking `precondition` against the fixture first
pub async fn run_with<E, P>(ctx: &VerifyContext, fixture: &str, precondition: P) -> ScenarioReport
where
    E: Expectation,
    P: FnOnce(&E) -> VerifyResult<()> + Send,
{
    let name = format!("{} ({})", E::KIND, fixture);
    let mut reached = Stage::Pending;
    let result = execute::<E, P>(ctx, fixture, precondition, &mut reached).await;

    match &result {
        Ok(()) => info!("{name}: passed"),
        Err(e) => warn!("{name}: failed after '{reached}': {e}"),
    }

    ScenarioReport {
        name,
        fixture: fixture.to_string(),
        reached,
        error: result.err(),
    }
}

async fn execute<E, P>(
    ctx: &VerifyContext,
    fixture: &str,
    precondition: P,
    reached: &mut Stage,
) -> VerifyResult<()>
where
    E: Expectation,
    P: FnOnce(&E) -> VerifyResult<()> + Send,
{
    let mut advance = |stage: Stage| {
        debug!("{fixture}: {stage}");
        *reached = stage;
    };

    // sanity check the fixture before touching the network
    let expected: E = load_fixture(ctx.fixtures(), fixture)?;
    let (entity, bundle) = expected.declared_type();
    if (entity, bundle) != (E::KIND.entity(), E::KIND.bundle()) {
        return Err(VerifyError::FixtureKind {
            fixture: fixture.to_string(),
            expected: E::KIND.to_string(),
            actual: format!("{entity}--{bundle}"),
        });
    }
    precondition(&expected)?;
    advance(Stage::FixtureLoaded);

    let query = JsonApiQuery::natural_key(E::KIND, expected.natural_key());
    let live: Resource<E::Attributes> = query.fetch_one(ctx.client()).await?;
    advance(Stage::LiveEntityFetched);

    let subject = format!("{} '{}'", E::KIND, expected.natural_key());
    let mut check = FieldCheck::new(subject.as_str());
    check
        .non_empty("id", &live.id)
        .equal("type.entity", E::KIND.entity(), live.entity())
        .equal("type.bundle", E::KIND.bundle(), live.bundle());
    expected.compare(&live.attributes, &mut check);
    check.finish()?;
    advance(Stage::AttributesVerified);

    let resolver = Resolver::new(ctx.client());
    expected
        .verify_relationships(&subject, &live, &resolver)
        .await?;
    advance(Stage::RelationshipsResolved);

    advance(Stage::Passed);
    Ok(())
}

/// Precondition failure helper
pub fn precondition_failed(fixture: &str, reason: impl Into<String>) -> VerifyError {
    VerifyError::FixturePrecondition {
        fixture: fixture.to_string(),
        reason: reason.into(),
    }
}
