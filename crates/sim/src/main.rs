//! Headless battle runner.
//!
//! Loads content (from `CLASH_DATA_DIR` or the embedded defaults), plays one
//! seeded battle with automated pilots on both sides and prints the result.
mod config;
mod pilot;

use anyhow::Context;
use clash_content::ContentFactory;

use crate::config::SimConfig;

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let config = SimConfig::from_env();
    let bundle = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_bundle()
            .with_context(|| format!("loading content from {}", dir.display()))?,
        None => clash_content::embedded::bundle().context("loading embedded content")?,
    };

    tracing::info!(seed = config.seed, max_turns = config.max_turns, "starting battle");
    let summary = pilot::run_battle(&bundle, &config)?;

    println!("seed {}: {}", summary.seed, summary.headline());
    println!("{} actions resolved", summary.actions);
    for (name, hp) in &summary.survivors {
        println!("  {name}: {hp} hp");
    }
    Ok(())
}
