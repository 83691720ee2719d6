//! Waveform synthesis building blocks.
//!
//! Every generator returns mono `f32` samples at [`SAMPLE_RATE`] with
//! `trunc(SAMPLE_RATE · duration)` samples. Time and phase are computed in
//! `f64` so long tracks do not drift.

use std::f64::consts::PI;

use rand::Rng;

use crate::params::audio_constants::{NORMALIZE_PEAK, SAMPLE_RATE};

/// Sample count for `duration` seconds
pub fn samples_for(duration: f64) -> usize {
    (SAMPLE_RATE as f64 * duration) as usize
}

/// Time in seconds of sample `i`
fn time(i: usize) -> f64 {
    i as f64 / SAMPLE_RATE as f64
}

pub fn silence(duration: f64) -> Vec<f32> {
    vec![0.0; samples_for(duration)]
}

pub fn sine(freq: f64, duration: f64, amp: f32) -> Vec<f32> {
    (0..samples_for(duration))
        .map(|i| amp * (2.0 * PI * freq * time(i)).sin() as f32)
        .collect()
}

/// Position within the current period, in `[0, 1)`
fn phase(freq: f64, i: usize) -> f64 {
    let period = 1.0 / freq;
    (time(i) % period) / period
}

/// Flute-like triangle: rises over the first half period, falls over the second
pub fn triangle(freq: f64, duration: f64, amp: f32) -> Vec<f32> {
    (0..samples_for(duration))
        .map(|i| {
            let p = phase(freq, i);
            let v = if p < 0.5 { 4.0 * p - 1.0 } else { 3.0 - 4.0 * p };
            amp * v as f32
        })
        .collect()
}

/// String-like ramp from -1 to 1 each period
pub fn sawtooth(freq: f64, duration: f64, amp: f32) -> Vec<f32> {
    (0..samples_for(duration))
        .map(|i| amp * (2.0 * phase(freq, i) - 1.0) as f32)
        .collect()
}

/// Uniform white noise in `[-amp, amp)`
pub fn noise(duration: f64, amp: f32, rng: &mut impl Rng) -> Vec<f32> {
    (0..samples_for(duration))
        .map(|_| amp * (rng.random::<f32>() * 2.0 - 1.0))
        .collect()
}

/// Oscillator shape used by [`melody`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Sawtooth,
}

impl Wave {
    pub fn render(self, freq: f64, duration: f64, amp: f32) -> Vec<f32> {
        match self {
            Wave::Sine => sine(freq, duration, amp),
            Wave::Triangle => triangle(freq, duration, amp),
            Wave::Sawtooth => sawtooth(freq, duration, amp),
        }
    }
}

/// Attack / decay / sustain / release envelope.
///
/// `attack`, `decay` and `release` are fractions of the shaped signal's
/// length; `sustain` is the held level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(0.05, 0.1, 0.7, 0.2)
    }
}

impl Adsr {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Gain at sample `i` of `total`
    pub fn gain(&self, i: usize, total: usize) -> f32 {
        let a = (total as f32 * self.attack) as usize;
        let d = (total as f32 * self.decay) as usize;
        let r = (total as f32 * self.release) as usize;
        // May start before the decay ends when the fractions overrun
        let release_start = total as isize - r as isize;

        let amp = if i < a {
            i as f32 / a.max(1) as f32
        } else if i < a + d {
            let di = (i - a) as f32;
            1.0 - (1.0 - self.sustain) * (di / d.max(1) as f32)
        } else if (i as isize) < release_start {
            self.sustain
        } else {
            let ri = (i as isize - release_start) as f32;
            self.sustain * (1.0 - ri / r.max(1) as f32)
        };
        amp.max(0.0)
    }

    pub fn apply(&self, mut samples: Vec<f32>) -> Vec<f32> {
        let total = samples.len();
        for (i, s) in samples.iter_mut().enumerate() {
            *s *= self.gain(i, total);
        }
        samples
    }
}

/// Scale so the loudest sample sits at `peak`; silence stays silent
pub fn normalize(samples: &mut [f32], peak: f32) {
    let max = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if max > 0.0 {
        let k = peak / max;
        for s in samples.iter_mut() {
            *s *= k;
        }
    }
}

/// Sum tracks (shorter ones are zero-padded) and normalise the peak to 0.8
pub fn mix(tracks: &[Vec<f32>]) -> Vec<f32> {
    let len = tracks.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = vec![0.0; len];
    for track in tracks {
        for (o, s) in out.iter_mut().zip(track) {
            *o += s;
        }
    }
    normalize(&mut out, NORMALIZE_PEAK);
    out
}

/// Single-tap feedback echo, then normalise the peak to 0.8.
///
/// Each sample picks up `decay` times the already-echoed sample one delay
/// earlier, so echoes repeat and fade.
pub fn reverb(mut samples: Vec<f32>, delay_ms: f64, decay: f32) -> Vec<f32> {
    let delay = (SAMPLE_RATE as f64 * delay_ms / 1000.0) as usize;
    for i in delay..samples.len() {
        let echo = samples[i - delay] * decay;
        samples[i] += echo;
    }
    normalize(&mut samples, NORMALIZE_PEAK);
    samples
}

/// Play `pattern` over `scale`.
///
/// A negative index is a rest; an index past the end of the scale wraps and
/// plays one octave up. Every note gets the default [`Adsr`].
pub fn melody(
    scale: &[f64],
    pattern: &[i32],
    note_duration: f64,
    wave: Wave,
    amp: f32,
) -> Vec<f32> {
    let mut out = Vec::with_capacity(pattern.len() * samples_for(note_duration));
    for &index in pattern {
        if index < 0 || scale.is_empty() {
            out.extend(silence(note_duration));
            continue;
        }
        let index = index as usize;
        let mut freq = scale[index % scale.len()];
        if index >= scale.len() {
            freq *= 2.0;
        }
        out.extend(Adsr::default().apply(wave.render(freq, note_duration, amp)));
    }
    out
}

/// Tanpura-style drone: fundamental, fifth and octave
pub fn drone(freq: f64, duration: f64, amp: f32) -> Vec<f32> {
    mix(&[
        sine(freq, duration, amp),
        sine(freq * 1.5, duration, amp * 0.4),
        sine(freq * 2.0, duration, amp * 0.3),
    ])
}

/// Tabla stroke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tabla {
    /// Dha/Na: sharp 400 Hz ring
    High,
    /// Bayan bass: 120 Hz thump that rings past the noise burst
    Low,
}

pub fn tabla_hit(pitch: Tabla, duration: f64, rng: &mut impl Rng) -> Vec<f32> {
    match pitch {
        Tabla::High => {
            let tone = Adsr::new(0.001, 0.05, 0.1, 0.6).apply(sine(400.0, duration, 0.6));
            let burst = Adsr::new(0.001, 0.02, 0.0, 0.3).apply(noise(duration, 0.2, rng));
            mix(&[tone, burst])
        }
        Tabla::Low => {
            let tone = Adsr::new(0.001, 0.1, 0.2, 0.5).apply(sine(120.0, duration * 1.5, 0.7));
            let burst = Adsr::new(0.001, 0.01, 0.0, 0.2).apply(noise(duration, 0.15, rng));
            mix(&[tone, burst])
        }
    }
}

/// Repeat `samples` until exactly `len` long (truncating the last pass)
pub fn loop_to(samples: &[f32], len: usize) -> Vec<f32> {
    if samples.is_empty() {
        return vec![0.0; len];
    }
    samples.iter().copied().cycle().take(len).collect()
}

/// Fixed-tempo percussion: `hit(beat)` starts every beat, padded with
/// silence to the beat length, cut to `len`
pub fn beat_track(len: usize, bpm: f64, mut hit: impl FnMut(usize) -> Vec<f32>) -> Vec<f32> {
    let beat = samples_for(60.0 / bpm);
    let mut out = Vec::with_capacity(len + beat);
    let mut n = 0;
    while out.len() < len {
        let h = hit(n);
        let pad = beat.saturating_sub(h.len());
        out.extend(h);
        out.resize(out.len() + pad, 0.0);
        n += 1;
    }
    out.truncate(len);
    out
}

/// Inclusive time axis `linspace(0, duration, n)`
pub fn time_axis(duration: f64) -> impl Iterator<Item = f64> {
    let n = samples_for(duration);
    let step = if n > 1 { duration / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| i as f64 * step)
}

/// `sin(2π·freq·t)·exp(−rate·t)` stinger
pub fn decaying(freq: f64, duration: f64, rate: f64) -> Vec<f32> {
    time_axis(duration)
        .map(|t| ((2.0 * PI * freq * t).sin() * (-rate * t).exp()) as f32)
        .collect()
}

/// Centred box low-pass of `width` taps, same length as the input
pub fn moving_average(samples: &[f32], width: usize) -> Vec<f32> {
    if width == 0 {
        return samples.to_vec();
    }
    let n = samples.len();
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0f64);
    for &s in samples {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + s as f64);
    }

    // Even widths lean one tap into the past; edges are zero-padded
    let before = width / 2;
    let after = width - 1 - before;
    (0..n)
        .map(|k| {
            let lo = k.saturating_sub(before);
            let hi = (k + after + 1).min(n);
            ((prefix[hi] - prefix[lo]) / width as f64) as f32
        })
        .collect()
}

/// Scale every sample by `gain`
pub fn scale(mut samples: Vec<f32>, gain: f32) -> Vec<f32> {
    for s in samples.iter_mut() {
        *s *= gain;
    }
    samples
}

/// Pointwise sum; the result has the longer length
pub fn add(a: &[f32], b: &[f32]) -> Vec<f32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = long.to_vec();
    for (o, s) in out.iter_mut().zip(short) {
        *o += s;
    }
    out
}

/// Scales used by the score (C4 to C5)
pub mod raga {
    /// Bilawal: bright, major-like
    pub const BILAWAL: [f64; 8] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25];
    /// Yaman: evening raga with a raised fourth
    pub const YAMAN: [f64; 8] = [261.63, 293.66, 329.63, 370.00, 392.00, 440.00, 493.88, 523.25];
    /// Bhairavi: melancholic, flattened
    pub const BHAIRAVI: [f64; 8] = [261.63, 277.18, 311.13, 349.23, 392.00, 415.30, 466.16, 523.25];
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_sample_counts_truncate() {
        assert_eq!(samples_for(0.05), 2205);
        assert_eq!(sine(440.0, 0.35, 0.5).len(), 15434);
        assert_eq!(silence(1.0).len(), 44_100);
    }

    #[test]
    fn test_triangle_and_saw_shapes() {
        // 441 Hz has exactly 100 samples per period
        let tri = triangle(441.0, 0.01, 1.0);
        let saw = sawtooth(441.0, 0.01, 1.0);

        assert!((tri[0] + 1.0).abs() < 1e-4);
        assert!((tri[25]).abs() < 1e-3);
        assert!((tri[50] - 1.0).abs() < 1e-3);
        assert!((saw[0] + 1.0).abs() < 1e-4);
        assert!((saw[75] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_noise_is_bounded_and_seeded() {
        let a = noise(0.1, 0.3, &mut StdRng::seed_from_u64(3));
        let b = noise(0.1, 0.3, &mut StdRng::seed_from_u64(3));

        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.abs() <= 0.3));
    }

    #[test]
    fn test_adsr_shape() {
        let env = Adsr::default();
        let total = 1000;

        assert_eq!(env.gain(0, total), 0.0);
        assert!((env.gain(50, total) - 1.0).abs() < 1e-6);
        assert!((env.gain(150, total) - 0.7).abs() < 1e-6);
        assert!((env.gain(500, total) - 0.7).abs() < 1e-6);
        assert!(env.gain(999, total) < 0.01);
    }

    #[test]
    fn test_adsr_overrun_never_negative() {
        let env = Adsr::new(0.5, 0.5, 0.2, 0.5);
        for i in 0..100 {
            assert!(env.gain(i, 100) >= 0.0);
        }
    }

    #[test]
    fn test_mix_pads_and_normalizes() {
        let out = mix(&[vec![0.5, 0.5, 0.5], vec![0.5]]);

        assert_eq!(out.len(), 3);
        assert!((out[0] - 0.8).abs() < 1e-6);
        assert!((out[1] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_mix_of_silence_stays_silent() {
        assert_eq!(mix(&[vec![0.0; 4]]), vec![0.0; 4]);
        assert!(mix(&[]).is_empty());
    }

    #[test]
    fn test_reverb_feeds_back() {
        // 1 ms at 44.1 kHz is 44 samples
        let mut impulse = vec![0.0; 200];
        impulse[0] = 1.0;
        let out = reverb(impulse, 1.0, 0.5);

        assert!((out[0] - 0.8).abs() < 1e-6);
        assert!((out[44] - 0.4).abs() < 1e-6);
        assert!((out[88] - 0.2).abs() < 1e-6);
        assert_eq!(out[43], 0.0);
    }

    #[test]
    fn test_melody_rests_and_octaves() {
        let scale = [100.0, 200.0];
        let notes = melody(&scale, &[-1, 2], 0.1, Wave::Sine, 0.5);

        assert_eq!(notes.len(), 2 * samples_for(0.1));
        assert!(notes[..4410].iter().all(|&s| s == 0.0));
        assert!(peak(&notes[4410..]) > 0.1);
    }

    #[test]
    fn test_drone_is_normalized() {
        let d = drone(110.0, 0.5, 0.1);
        assert!((peak(&d) - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_low_tabla_outlasts_its_duration() {
        let mut rng = StdRng::seed_from_u64(0);
        let hit = tabla_hit(Tabla::Low, 0.2, &mut rng);
        assert_eq!(hit.len(), samples_for(0.3));
        assert_eq!(tabla_hit(Tabla::High, 0.2, &mut rng).len(), samples_for(0.2));
    }

    #[test]
    fn test_loop_to_cycles() {
        assert_eq!(loop_to(&[1.0, 2.0, 3.0], 7), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
        assert_eq!(loop_to(&[1.0, 2.0, 3.0], 2), vec![1.0, 2.0]);
        assert_eq!(loop_to(&[], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_beat_track_spacing() {
        // 60 BPM at 44.1 kHz: one hit per 44100 samples
        let track = beat_track(100_000, 60.0, |_| vec![1.0; 10]);

        assert_eq!(track.len(), 100_000);
        assert_eq!(track[44_100], 1.0);
        assert_eq!(track[44_110], 0.0);
        assert_eq!(track.iter().filter(|&&s| s == 1.0).count(), 30);
    }

    #[test]
    fn test_decaying_starts_at_zero_and_fades() {
        let s = decaying(440.0, 0.2, 20.0);

        assert_eq!(s.len(), samples_for(0.2));
        assert_eq!(s[0], 0.0);
        assert!(peak(&s[..1000]) > peak(&s[s.len() - 1000..]));
    }

    #[test]
    fn test_moving_average_window() {
        let out = moving_average(&[0.0, 0.0, 4.0, 0.0, 0.0], 2);

        // Even kernel: output k averages k-1 and k
        assert_eq!(out, vec![0.0, 0.0, 2.0, 2.0, 0.0]);
        assert_eq!(moving_average(&[1.0, 1.0], 0), vec![1.0, 1.0]);
    }

    #[test]
    fn test_add_keeps_longer() {
        assert_eq!(add(&[1.0], &[1.0, 2.0]), vec![2.0, 2.0]);
        assert_eq!(scale(vec![2.0, -1.0], 0.5), vec![1.0, -0.5]);
    }
}
