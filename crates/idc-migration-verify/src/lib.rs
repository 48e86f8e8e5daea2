//! Migration verification for the IDC repository
//!
//! Each scenario loads an expected-state JSON fixture, fetches the migrated
//! entity from the repository's JSON:API by its natural key, compares the
//! attributes field by field, then follows the declared relationships and
//! checks the entities at the other end.
//!
//! ```text
//! ┌──────────────┐   load    ┌──────────────┐
//! │   Fixture    ├──────────►│   Scenario   │
//! │   (JSON)     │           │              │
//! └──────────────┘           └──────┬───────┘
//!                                   │ query / resolve
//!                            ┌──────▼───────┐
//!                            │   JSON:API   │
//!                            │   (Drupal)   │
//!                            └──────────────┘
//! ```
//!
//! Scenarios share no mutable state, so the suite runs them concurrently.

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod expected;
pub mod fixture;
pub mod harness;
pub mod query;
pub mod resolve;
pub mod scenario;
pub mod scenarios;

pub use client::JsonApiClient;
pub use compare::{DiffCategory, Difference, FieldCheck};
pub use config::VerifyConfig;
pub use error::{VerifyError, VerifyResult};
pub use fixture::{load_fixture, DirFixtures, FixtureSource};
pub use harness::{init_tracing, VerificationSuite};
pub use query::JsonApiQuery;
pub use resolve::{Resolver, MAX_DEPTH};
pub use scenario::{Expectation, ScenarioReport, Stage, VerifyContext};
pub use scenarios::Scenario;
