//! 16-bit mono PCM WAV output via `hound`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::output::ensure_dir;
use crate::params::audio_constants::{MAX_AMP, SAMPLE_RATE};

/// Format of every file the generator writes
pub fn spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Float sample to PCM: truncate toward zero, clamp to ±32767
pub fn to_pcm(sample: f32) -> i16 {
    let v = (sample * MAX_AMP) as i32;
    v.clamp(-(MAX_AMP as i32), MAX_AMP as i32) as i16
}

/// Write `<dir>/<name>.wav`
pub fn write_wav(samples: &[f32], dir: &Path, name: &str) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{name}.wav"));

    let mut writer = hound::WavWriter::create(&path, spec())
        .with_context(|| format!("creating {}", path.display()))?;
    for &s in samples {
        writer
            .write_sample(to_pcm(s))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .finalize()
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(path)
}

/// Write the same clip to every directory in `dirs` and log it once
pub fn write_everywhere(samples: &[f32], dirs: &[PathBuf], name: &str) -> Result<()> {
    for dir in dirs {
        write_wav(samples, dir, name)?;
    }
    info!(
        "Generated: {}.wav ({:.2}s)",
        name,
        samples.len() as f32 / SAMPLE_RATE as f32
    );
    Ok(())
}
