//! Migration verification runner
//!
//! Usage: `verify-migrations [--wait SECS] [SCENARIO...]`
//!
//! With no scenario names the whole catalogue runs. Exits non-zero when any
//! scenario fails.

use anyhow::{bail, Context, Result};
use idc_migration_verify::{init_tracing, Scenario, VerificationSuite, VerifyConfig};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut wait = None;
    let mut scenarios = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--wait" {
            let secs = args.next().context("--wait needs a number of seconds")?;
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid --wait value {secs:?}"))?;
            wait = Some(Duration::from_secs(secs));
            continue;
        }
        match Scenario::ALL.iter().find(|s| s.name() == arg) {
            Some(s) => scenarios.push(*s),
            None => bail!(
                "unknown scenario {arg:?}; expected one of: {}",
                Scenario::ALL.map(|s| s.name()).join(", ")
            ),
        }
    }
    if scenarios.is_empty() {
        scenarios.extend(Scenario::ALL);
    }

    let config = VerifyConfig::from_env();
    info!("Verifying migrations at {}", config.base_url);
    info!("Fixtures: {}", config.fixture_dir.display());

    let mut suite = VerificationSuite::new(config)?;
    if let Some(timeout) = wait {
        suite.wait_for_api(timeout).await?;
    }

    suite.run(&scenarios).await;
    suite.print_summary();

    if !suite.all_passed() {
        bail!("migration verification failed");
    }
    Ok(())
}
