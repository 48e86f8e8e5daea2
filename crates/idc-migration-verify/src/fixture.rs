//! Expected-state fixture loading
//!
//! Fixtures are JSON documents keyed by a flat file name, e.g.
//! `taxonomy-person-01.json`.

use crate::error::{VerifyError, VerifyResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A store of expected-state documents
pub trait FixtureSource: Send + Sync {
    /// Read the raw content of the named fixture
    fn read(&self, name: &str) -> VerifyResult<String>;
}

/// Fixtures stored as files in one directory
#[derive(Debug, Clone)]
pub struct DirFixtures {
    dir: PathBuf,
}

impl DirFixtures {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FixtureSource for DirFixtures {
    fn read(&self, name: &str) -> VerifyResult<String> {
        check_name(name)?;
        let path = self.dir.join(name);
        debug!("Loading fixture {:?}", path);

        if !path.is_file() {
            return Err(VerifyError::FixtureNotFound {
                name: name.to_string(),
                path,
            });
        }

        std::fs::read_to_string(&path).map_err(|e| VerifyError::FixtureRead { path, source: e })
    }
}

/// Load the named fixture and decode it as `T`
pub fn load_fixture<T: DeserializeOwned>(source: &dyn FixtureSource, name: &str) -> VerifyResult<T> {
    let content = source.read(name)?;
    serde_json::from_str(&content).map_err(|e| VerifyError::FixtureParse {
        name: name.to_string(),
        source: e,
    })
}

/// Fixture names must be a single path component
fn check_name(name: &str) -> VerifyResult<()> {
    let mut components = Path::new(name).components();
    let flat = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !flat || name.contains(['/', '\\']) {
        return Err(VerifyError::FixtureName {
            name: name.to_string(),
        });
    }
    Ok(())
}
