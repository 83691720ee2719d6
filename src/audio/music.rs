//! Raga-based background score.
//!
//! Seven themes cover the ten track names the game streams; several
//! scenes share a theme.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::synthesis::{
    beat_track, drone, loop_to, melody, mix, raga, reverb, samples_for, tabla_hit, Tabla, Wave,
};
use crate::params::audio_constants::SAMPLE_RATE;
use crate::params::GeneratorConfig;

/// Default loop length (seconds)
const LOOP_SECONDS: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Gentle nahor-tree theme, 20 s
    Menu,
    /// Happy home: warm Bilawal over a 90 BPM tabla
    Act1,
    /// Descent: Bhairavi on saw strings, heavier 100 BPM rhythm
    Act2,
    /// Rice husker minigame: accelerating beat, 60 s
    Dheki,
    /// Spirit awakens: ethereal Yaman sines, long reverb
    Act3,
    /// Boss: fast Bhairavi over a 140 BPM drive
    Act4Boss,
    /// Dawn: rising Bilawal
    Epilogue,
}

/// Track file name and the theme it plays
pub const TRACKS: [(&str, Theme); 10] = [
    ("menu", Theme::Menu),
    ("act1_happy", Theme::Act1),
    ("act1_funeral", Theme::Act2),
    ("act2_descent", Theme::Act2),
    ("act2_dheki", Theme::Dheki),
    ("act2_burial", Theme::Act2),
    ("act3_arrival", Theme::Act3),
    ("act3_dual", Theme::Act3),
    ("act4_boss", Theme::Act4Boss),
    ("epilogue", Theme::Epilogue),
];

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Menu => "menu",
            Theme::Act1 => "act1",
            Theme::Act2 => "act2",
            Theme::Dheki => "dheki",
            Theme::Act3 => "act3",
            Theme::Act4Boss => "act4_boss",
            Theme::Epilogue => "epilogue",
        }
    }

    /// Length of the rendered loop (seconds)
    pub fn duration(self) -> f64 {
        match self {
            Theme::Menu => 20.0,
            Theme::Dheki => 60.0,
            _ => LOOP_SECONDS,
        }
    }

    pub fn render(self, rng: &mut StdRng) -> Vec<f32> {
        match self {
            Theme::Menu => menu(),
            Theme::Act1 => act1(rng),
            Theme::Act2 => act2(rng),
            Theme::Dheki => dheki(rng),
            Theme::Act3 => act3(),
            Theme::Act4Boss => act4_boss(rng),
            Theme::Epilogue => epilogue(),
        }
    }
}

/// Repeat a 32-step phrase `times` times
fn phrase(steps: [i32; 32], times: usize) -> Vec<i32> {
    steps.repeat(times)
}

fn menu() -> Vec<f32> {
    let duration = Theme::Menu.duration();
    let bed = drone(164.81, duration, 0.08);
    let pattern = [0, -1, 4, -1, 5, 4, 2, 0, -1, -1, 2, -1, 4, 2, 0, -1].repeat(5);
    let tune = melody(&raga::YAMAN, &pattern, 0.4, Wave::Triangle, 0.25);
    let tune = loop_to(&tune, bed.len());

    reverb(mix(&[bed, tune]), 300.0, 0.35)
}

fn act1(rng: &mut StdRng) -> Vec<f32> {
    let bed = drone(130.81, LOOP_SECONDS, 0.12);
    let pattern = phrase(
        [
            0, 2, 4, 5, 4, 2, 0, -1, //
            2, 4, 5, 7, 5, 4, 2, -1, //
            4, 5, 7, 8, 7, 5, 4, 2, //
            0, 2, 0, -1, -1, -1, -1, -1,
        ],
        4,
    );
    let tune = melody(&raga::BILAWAL, &pattern, 0.25, Wave::Triangle, 0.35);
    let tune = loop_to(&tune, bed.len());
    let rhythm = beat_track(bed.len(), 90.0, |_| tabla_hit(Tabla::High, 0.1, rng));

    reverb(mix(&[bed, tune, rhythm]), 100.0, 0.2)
}

fn act2(rng: &mut StdRng) -> Vec<f32> {
    let bed = drone(110.0, LOOP_SECONDS, 0.10);
    let pattern = phrase(
        [
            7, 6, 5, 4, 3, 2, 1, 0, //
            0, 1, 2, 3, 2, 1, 0, -1, //
            3, 4, 5, 4, 3, 2, 1, 0, //
            0, -1, 0, -1, -1, -1, -1, -1,
        ],
        4,
    );
    let tune = melody(&raga::BHAIRAVI, &pattern, 0.28, Wave::Sawtooth, 0.25);
    let tune = loop_to(&tune, bed.len());
    let rhythm = beat_track(bed.len(), 100.0, |beat| {
        let pitch = if beat % 4 == 0 { Tabla::Low } else { Tabla::High };
        tabla_hit(pitch, 0.12, rng)
    });

    reverb(mix(&[bed, tune, rhythm]), 150.0, 0.3)
}

/// Samples per beat: the period is taken in seconds first, then scaled
fn beat_interval(bpm: f64) -> usize {
    (SAMPLE_RATE as f64 * (60.0 / bpm)) as usize
}

/// Tempo that follows beat `beat` of the dheki ramp
fn dheki_bpm(beat: usize) -> f64 {
    f64::min(150.0, 90.0 + beat as f64 * 0.3)
}

/// Beat reference for the dheki minigame: starts at 90 BPM and speeds up
/// by 0.3 BPM per beat up to 150
fn dheki(rng: &mut StdRng) -> Vec<f32> {
    let total = samples_for(Theme::Dheki.duration());
    let mut out = Vec::with_capacity(total);
    let mut bpm = 90.0;
    let mut beat = 0usize;

    while out.len() < total {
        let hit = if beat % 2 == 0 {
            tabla_hit(Tabla::Low, 0.2, rng)
        } else {
            tabla_hit(Tabla::High, 0.15, rng)
        };
        let interval = beat_interval(bpm);
        let pad = interval.saturating_sub(hit.len());
        out.extend(hit);
        out.resize(out.len() + pad, 0.0);

        bpm = dheki_bpm(beat);
        beat += 1;
    }
    out.truncate(total);
    out
}

fn act3() -> Vec<f32> {
    let bed = drone(196.0, LOOP_SECONDS, 0.08);
    let pattern = phrase(
        [
            0, 3, 4, 5, 7, 5, 4, 3, //
            4, 5, 7, 8, 7, 5, 4, -1, //
            -1, 0, 2, 3, 4, 3, 2, 0, //
            -1, -1, -1, 0, -1, -1, -1, -1,
        ],
        4,
    );
    let tune = melody(&raga::YAMAN, &pattern, 0.35, Wave::Sine, 0.3);
    let tune = loop_to(&tune, bed.len());

    reverb(mix(&[bed, tune]), 200.0, 0.4)
}

fn act4_boss(rng: &mut StdRng) -> Vec<f32> {
    let bed = drone(98.0, LOOP_SECONDS, 0.15);
    let pattern = phrase(
        [
            0, 0, 3, 5, 0, 0, 3, 5, //
            7, 5, 3, 0, 7, 5, 3, 0, //
            0, 2, 3, 5, 7, 5, 3, 2, //
            0, 0, -1, 0, 0, -1, 0, 0,
        ],
        4,
    );
    let tune = melody(&raga::BHAIRAVI, &pattern, 0.15, Wave::Sawtooth, 0.35);
    let tune = loop_to(&tune, bed.len());
    let rhythm = beat_track(bed.len(), 140.0, |beat| {
        let pitch = if beat % 2 == 0 { Tabla::Low } else { Tabla::High };
        tabla_hit(pitch, 0.08, rng)
    });

    reverb(mix(&[bed, tune, rhythm]), 60.0, 0.15)
}

fn epilogue() -> Vec<f32> {
    let bed = drone(196.0, LOOP_SECONDS, 0.10);
    let pattern = phrase(
        [
            0, 2, 4, 5, 7, 8, 7, 5, //
            4, 5, 7, 8, 10, 8, 7, -1, //
            8, 7, 5, 4, 5, 7, 8, 10, //
            8, 7, 5, 4, 2, 0, -1, -1,
        ],
        4,
    );
    let tune = melody(&raga::BILAWAL, &pattern, 0.35, Wave::Triangle, 0.3);
    let tune = loop_to(&tune, bed.len());

    reverb(mix(&[bed, tune]), 250.0, 0.4)
}

/// Render every theme once, keyed for the track table
pub fn render_themes(config: &GeneratorConfig) -> HashMap<Theme, Vec<f32>> {
    let mut rendered = HashMap::new();
    for (_, theme) in TRACKS {
        rendered.entry(theme).or_insert_with(|| {
            let seed = config.seed_for(&format!("music_{}", theme.name()));
            let mut rng = StdRng::seed_from_u64(seed);
            theme.render(&mut rng)
        });
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_track_table_covers_every_theme() {
        let themes: std::collections::HashSet<_> = TRACKS.iter().map(|(_, t)| *t).collect();
        assert_eq!(themes.len(), 7);
        assert_eq!(TRACKS.len(), 10);
    }

    #[test]
    fn test_menu_length_and_level() {
        let track = Theme::Menu.render(&mut rng());

        assert_eq!(track.len(), 20 * 44_100);
        let peak = track.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_dheki_is_a_minute_long() {
        let track = Theme::Dheki.render(&mut rng());
        assert_eq!(track.len(), 60 * 44_100);
    }

    #[test]
    fn test_dheki_accelerates() {
        let track = Theme::Dheki.render(&mut rng());
        // Onsets: first sample of each hit after a run of silence
        let onsets: Vec<usize> = (1..track.len())
            .filter(|&i| track[i - 1] == 0.0 && track[i] != 0.0)
            .collect();

        let early = onsets[2] - onsets[1];
        let late = onsets[onsets.len() - 1] - onsets[onsets.len() - 2];
        assert!(late < early);
    }

    #[test]
    fn test_beat_interval_along_the_ramp() {
        assert_eq!(beat_interval(90.0), 29_400);
        assert_eq!(beat_interval(dheki_bpm(1)), 29_302);
        assert_eq!(beat_interval(dheki_bpm(7)), 28_729);
        assert_eq!(beat_interval(dheki_bpm(33)), 26_486);
        assert_eq!(beat_interval(dheki_bpm(99)), 22_105);
        assert_eq!(dheki_bpm(200), 150.0);
        assert_eq!(beat_interval(dheki_bpm(500)), 17_640);
    }

    #[test]
    fn test_act_themes_are_thirty_seconds() {
        for theme in [Theme::Act3, Theme::Epilogue] {
            assert_eq!(theme.render(&mut rng()).len(), 30 * 44_100);
        }
    }
}
