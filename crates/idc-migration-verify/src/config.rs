//! Configuration for verification runs
//!
//! Configuration is plain data handed to each scenario; nothing here is
//! global, so scenarios can be built independently and run in parallel.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory under `tests/` holding the migration backend test resources
pub const TEST_BASEDIR: &str = "10-migration-backend-tests";

/// Name of the directory holding expected-state fixtures
pub const EXPECTED_DIR: &str = "expected";

/// Base URL of the IDC test instance
pub const DEFAULT_BASE_URL: &str = "https://islandora-idc.traefik.me";

/// Configuration for the verification environment
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Base URL of the repository under test
    pub base_url: String,
    /// Directory holding the expected JSON fixtures
    pub fixture_dir: PathBuf,
    /// Accept self-signed certificates (the test stack uses one)
    pub accept_invalid_certs: bool,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout: Option<Duration>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl VerifyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let fixture_dir = env::var("IDC_FIXTURE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                env::current_dir()
                    .ok()
                    .and_then(|cwd| discover_fixture_dir(&cwd))
                    .unwrap_or_else(bundled_fixture_dir)
            });

        let accept_invalid_certs = env::var("IDC_ACCEPT_INVALID_CERTS")
            .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
            .unwrap_or(true);

        let base_url = env::var("IDC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: normalize_base_url(&base_url),
            fixture_dir,
            accept_invalid_certs,
            request_timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_fixture_dir(mut self, fixture_dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = fixture_dir.into();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Fixtures shipped with this crate
pub fn bundled_fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(EXPECTED_DIR)
}

/// Locate the expected-fixture directory below `root`
///
/// Prefers `<TEST_BASEDIR>/verification/expected` (the layout when invoked
/// from the repository root), then any directory named `expected` (the
/// layout when invoked from inside the test directory).
pub fn discover_fixture_dir(root: &Path) -> Option<PathBuf> {
    if let Some(base) = find_dir(root, &|name| name == TEST_BASEDIR) {
        let expected = base.join("verification").join(EXPECTED_DIR);
        if expected.is_dir() {
            debug!("Found test basedir {:?}", base);
            return Some(expected);
        }
    }

    let found = find_dir(root, &|name| name == EXPECTED_DIR);
    if let Some(ref dir) = found {
        debug!("Found fixture dir {:?}", dir);
    }
    found
}

/// Breadth-first search for a directory whose name satisfies `matches`
fn find_dir(root: &Path, matches: &dyn Fn(&str) -> bool) -> Option<PathBuf> {
    let mut queue = vec![root.to_path_buf()];

    while !queue.is_empty() {
        let mut next = Vec::new();
        for dir in queue {
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            let mut children: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect();
            children.sort();

            for child in children {
                let Some(name) = child.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if matches(name) {
                    return Some(child);
                }
                // Skip build output and hidden directories
                if name != "target" && !name.starts_with('.') {
                    next.push(child);
                }
            }
        }
        queue = next;
    }

    None
}
