use anyhow::Context;
use log::info;

use trainer_smoke::{
    SmokeConfig,
    checks::{check_accuracy_improved, check_loss_trend},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SmokeConfig::from_env().context("invalid smoke configuration")?;
    info!("Starting tests ... {config:?}");

    let (_, report) = trainer_smoke::train(&config).context("training failed")?;

    let slope = check_loss_trend(&report).context("Test 1-a failed")?;
    info!("Test 1-a: validation loss trends down ... PASSED (slope {slope:.5})");

    check_accuracy_improved(&report, "classif_accuracy").context("Test 1-b failed")?;
    info!("Test 1-b: validation accuracy improves ... PASSED");

    info!("All tests PASSED");
    Ok(())
}
