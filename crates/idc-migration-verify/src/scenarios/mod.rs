//! The scenario catalogue: one entry per migrated fixture

mod collection;
mod corporate_body;
mod family;
mod geolocation;
mod language;
mod person;
mod terms;

pub use collection::{ExpectedCollection, LangValue};
pub use corporate_body::{ExpectedCorporateBody, ExpectedRelation};
pub use family::{ExpectedFamily, FAMILY_DATES, REL_KNOWS_ABOUT};
pub use geolocation::{ExpectedGeolocation, GEO_ALT_NAMES};
pub use language::ExpectedLanguage;
pub use person::{check_rest_of_name, ExpectedPerson, REL_KNOWS};
pub use terms::{
    ExpectedAccessRights, ExpectedCopyrightAndUse, ExpectedGenre, ExpectedResourceType,
    ExpectedSubject,
};

use crate::scenario::{self, precondition_failed, ScenarioReport, VerifyContext};
use std::fmt;

/// A named verification scenario bound to its fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Person1,
    Person2,
    AccessRights,
    CopyrightAndUse,
    Family,
    Genre,
    Geolocation,
    ResourceType,
    Subject,
    Language,
    CorporateBody,
    Collection,
}

impl Scenario {
    pub const ALL: [Scenario; 12] = [
        Scenario::Person1,
        Scenario::Person2,
        Scenario::AccessRights,
        Scenario::CopyrightAndUse,
        Scenario::Family,
        Scenario::Genre,
        Scenario::Geolocation,
        Scenario::ResourceType,
        Scenario::Subject,
        Scenario::Language,
        Scenario::CorporateBody,
        Scenario::Collection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Person1 => "person-01",
            Scenario::Person2 => "person-02",
            Scenario::AccessRights => "access-rights",
            Scenario::CopyrightAndUse => "copyright-and-use",
            Scenario::Family => "family",
            Scenario::Genre => "genre",
            Scenario::Geolocation => "geolocation",
            Scenario::ResourceType => "resource-types",
            Scenario::Subject => "subject",
            Scenario::Language => "language",
            Scenario::CorporateBody => "corporate-body",
            Scenario::Collection => "collection",
        }
    }

    /// File name of the expected-state fixture
    pub fn fixture(self) -> &'static str {
        match self {
            Scenario::Person1 => "taxonomy-person-01.json",
            Scenario::Person2 => "taxonomy-person-02.json",
            Scenario::AccessRights => "taxonomy-accessrights.json",
            Scenario::CopyrightAndUse => "taxonomy-copyrightanduse.json",
            Scenario::Family => "taxonomy-family-01.json",
            Scenario::Genre => "taxonomy-genre.json",
            Scenario::Geolocation => "taxonomy-geolocation.json",
            Scenario::ResourceType => "taxonomy-resourcetypes.json",
            Scenario::Subject => "taxonomy-subject.json",
            Scenario::Language => "taxonomy-language.json",
            Scenario::CorporateBody => "taxonomy-corporatebody-02.json",
            Scenario::Collection => "collection-01.json",
        }
    }

    /// Run this scenario against `ctx`
    pub async fn run(self, ctx: &VerifyContext) -> ScenarioReport {
        let fixture = self.fixture();
        let mut report = match self {
            Scenario::Person1 => run_person(ctx, fixture, "Ansel Easton").await,
            Scenario::Person2 => run_person(ctx, fixture, "Lewis Wickes").await,
            Scenario::AccessRights => scenario::run::<ExpectedAccessRights>(ctx, fixture).await,
            Scenario::CopyrightAndUse => {
                scenario::run::<ExpectedCopyrightAndUse>(ctx, fixture).await
            }
            Scenario::Family => scenario::run::<ExpectedFamily>(ctx, fixture).await,
            Scenario::Genre => scenario::run::<ExpectedGenre>(ctx, fixture).await,
            Scenario::Geolocation => scenario::run::<ExpectedGeolocation>(ctx, fixture).await,
            Scenario::ResourceType => scenario::run::<ExpectedResourceType>(ctx, fixture).await,
            Scenario::Subject => scenario::run::<ExpectedSubject>(ctx, fixture).await,
            Scenario::Language => scenario::run::<ExpectedLanguage>(ctx, fixture).await,
            Scenario::CorporateBody => scenario::run::<ExpectedCorporateBody>(ctx, fixture).await,
            Scenario::Collection => scenario::run::<ExpectedCollection>(ctx, fixture).await,
        };
        report.name = format!("{} {}", self.name(), report.name);
        report
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

async fn run_person(ctx: &VerifyContext, fixture: &str, rest_of_name: &str) -> ScenarioReport {
    scenario::run_with::<ExpectedPerson, _>(ctx, fixture, |person| {
        check_rest_of_name(person, rest_of_name).map_err(|reason| precondition_failed(fixture, reason))
    })
    .await
}
