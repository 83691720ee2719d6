//! Blossom assets - procedural art and audio for *Tejimola: The Blossom From Clay*
//!
//! Draws character sheets, parallax backgrounds, UI chrome, props and
//! effect sprites, then synthesises raga-based music and sound effects,
//! straight into the Unity project's asset folders.

use anyhow::Result;
use clap::Parser;
use log::info;

use blossom_assets::cli::Args;
use blossom_assets::generate;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();
    let groups = args.resolved_groups();

    info!(
        "Generating {:?} into {} (seed {})",
        groups,
        config.out_root.display(),
        config.seed
    );
    generate(&config, &groups)?;
    info!("All assets generated");
    Ok(())
}
