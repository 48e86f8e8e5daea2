//! Suite harness for running the scenario catalogue

use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::scenario::{ScenarioReport, VerifyContext};
use crate::scenarios::Scenario;
use futures::future::join_all;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs scenarios against one repository and collects their reports
pub struct VerificationSuite {
    pub config: VerifyConfig,
    context: VerifyContext,
    pub reports: Vec<ScenarioReport>,
}

impl VerificationSuite {
    /// Create a suite from config
    pub fn new(config: VerifyConfig) -> VerifyResult<Self> {
        let context = VerifyContext::new(&config)?;
        Ok(Self::with_context(config, context))
    }

    /// Create a suite around an existing context
    pub fn with_context(config: VerifyConfig, context: VerifyContext) -> Self {
        Self {
            config,
            context,
            reports: Vec::new(),
        }
    }

    pub fn context(&self) -> &VerifyContext {
        &self.context
    }

    /// Wait for the JSON:API root to answer
    pub async fn wait_for_api(&self, timeout: Duration) -> VerifyResult<()> {
        println!("Waiting for JSON:API at {}...", self.config.base_url);
        if !self.context.client().wait_for_healthy(timeout).await {
            return Err(VerifyError::NotReady {
                url: self.config.base_url.clone(),
                timeout,
            });
        }
        println!("✓ JSON:API is ready");
        Ok(())
    }

    /// Run the whole catalogue
    pub async fn run_all(&mut self) -> &[ScenarioReport] {
        self.run(&Scenario::ALL).await
    }

    /// Run the given scenarios concurrently, appending their reports
    pub async fn run(&mut self, scenarios: &[Scenario]) -> &[ScenarioReport] {
        info!("Running {} scenarios against {}", scenarios.len(), self.config.base_url);
        let ctx = &self.context;
        let reports = join_all(scenarios.iter().map(|s| s.run(ctx))).await;

        let start = self.reports.len();
        self.reports.extend(reports);
        &self.reports[start..]
    }

    /// Print summary of all reports
    pub fn print_summary(&self) {
        println!("\n=== Migration Verification Summary ===");
        println!("Repository: {}", self.config.base_url);
        println!("Fixtures: {}", self.config.fixture_dir.display());
        println!();

        let passed = self.reports.iter().filter(|r| r.passed()).count();
        let total = self.reports.len();

        for report in &self.reports {
            report.print_summary();
        }

        println!();
        println!("Results: {}/{} passed", passed, total);

        if passed == total {
            println!("✅ All scenarios passed!");
        } else {
            println!("❌ {} scenarios failed", total - passed);
        }
    }

    /// Check if every scenario run so far passed
    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(|r| r.passed())
    }
}

/// Install the fmt subscriber, honouring `RUST_LOG` (default `info`)
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
