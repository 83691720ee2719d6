//! Procedural audio: raga-based music loops and sound effects.
//!
//! Synthesis primitives live in [`synthesis`], the score in [`music`], the
//! effects in [`sfx`] and 16-bit PCM output in [`wav`]. Every clip is
//! written to both the editor audio folder and the runtime `Resources`
//! copy.

pub mod music;
pub mod sfx;
pub mod synthesis;
pub mod wav;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::params::GeneratorConfig;
use music::{Theme, TRACKS};
use wav::write_everywhere;

/// Render every music track; aliases share one rendering per theme
pub fn generate_music(config: &GeneratorConfig) -> Result<usize> {
    info!("--- MUSIC ---");
    let dirs = config.layout().music_dirs();
    let themes = music::render_themes(config);

    write_tracks(&themes, &dirs, &TRACKS)
}

/// Write each `(name, theme)` track from the rendered themes
fn write_tracks(
    themes: &HashMap<Theme, Vec<f32>>,
    dirs: &[PathBuf],
    tracks: &[(&str, Theme)],
) -> Result<usize> {
    for &(name, theme) in tracks {
        let samples = themes
            .get(&theme)
            .ok_or_else(|| anyhow!("theme {} was not rendered", theme.name()))
            .with_context(|| format!("writing track {name}"))?;
        write_everywhere(samples, dirs, name)?;
    }
    Ok(tracks.len())
}

pub fn generate_sfx(config: &GeneratorConfig) -> Result<usize> {
    info!("--- SOUND EFFECTS ---");
    let dirs = config.layout().sfx_dirs();
    let mut rng = StdRng::seed_from_u64(config.seed_for("sfx"));

    let clips = sfx::sound_effects(&mut rng);
    for (name, samples) in &clips {
        write_everywhere(samples, &dirs, name)?;
    }
    Ok(clips.len())
}

pub fn generate_all(config: &GeneratorConfig) -> Result<()> {
    let tracks = generate_music(config)?;
    let effects = generate_sfx(config)?;
    info!("Total music tracks: {tracks}");
    info!("Total SFX: {effects}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_theme_is_an_error() {
        let dir = std::env::temp_dir().join(format!("blossom-tracks-{}", std::process::id()));
        let mut themes = HashMap::new();
        themes.insert(Theme::Menu, vec![0.0; 10]);

        let err = write_tracks(
            &themes,
            &[dir.clone()],
            &[("menu", Theme::Menu), ("act2_dheki", Theme::Dheki)],
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("act2_dheki"));
        assert!(format!("{err:#}").contains("dheki was not rendered"));
        // Tracks before the gap are still written
        assert!(dir.join("menu.wav").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
