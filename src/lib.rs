//! Blossom assets library - procedural art and audio for the Tejimola game

pub mod audio;
pub mod backgrounds;
pub mod characters;
pub mod cli;
pub mod output;
pub mod params;
pub mod props;
pub mod raster;
pub mod ui;
pub mod vfx;

use anyhow::Result;

use cli::AssetGroup;
use params::GeneratorConfig;

/// Run one asset group; `All` runs every group
pub fn generate_group(config: &GeneratorConfig, group: AssetGroup) -> Result<()> {
    match group {
        AssetGroup::Characters => characters::generate_all(config),
        AssetGroup::Backgrounds => backgrounds::generate_all(config),
        AssetGroup::Ui => ui::generate_all(config),
        AssetGroup::Props => props::generate_all(config),
        AssetGroup::Vfx => vfx::generate_all(config),
        AssetGroup::Audio => audio::generate_all(config),
        AssetGroup::All => generate(config, &AssetGroup::EVERY),
    }
}

/// Run `groups` in order, stopping at the first failure
pub fn generate(config: &GeneratorConfig, groups: &[AssetGroup]) -> Result<()> {
    for &group in groups {
        generate_group(config, group)?;
    }
    Ok(())
}
