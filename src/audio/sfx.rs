//! Sound effects: footsteps, UI blips, ambience and rhythm stingers.

use std::f64::consts::PI;

use rand::Rng;

use super::synthesis::{
    add, decaying, mix, moving_average, noise, reverb, samples_for, scale, silence, sine,
    tabla_hit, time_axis, triangle, Adsr, Tabla,
};
use crate::params::audio_constants::SAMPLE_RATE;

/// Named clip, written as `<name>.wav`
pub type Clip = (String, Vec<f32>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Wood,
    Grass,
    Stone,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Wood, Surface::Grass, Surface::Stone];

    pub fn name(self) -> &'static str {
        match self {
            Surface::Wood => "wood",
            Surface::Grass => "grass",
            Surface::Stone => "stone",
        }
    }
}

/// One footstep; wood and stone have a jittered pitch
pub fn footstep(surface: Surface, rng: &mut impl Rng) -> Vec<f32> {
    match surface {
        Surface::Wood => {
            let freq = 200.0 + rng.random_range(-30i32..=30) as f64;
            let body = mix(&[sine(freq, 0.05, 0.5), noise(0.05, 0.3, rng)]);
            Adsr::new(0.001, 0.01, 0.0, 0.5).apply(body)
        }
        Surface::Grass => Adsr::new(0.001, 0.02, 0.0, 0.6).apply(noise(0.08, 0.2, rng)),
        Surface::Stone => {
            let freq = 300.0 + rng.random_range(-50i32..=50) as f64;
            let body = mix(&[sine(freq, 0.04, 0.4), noise(0.04, 0.2, rng)]);
            Adsr::new(0.001, 0.005, 0.0, 0.4).apply(body)
        }
    }
}

fn seconds(i: usize) -> f64 {
    i as f64 / SAMPLE_RATE as f64
}

/// Rising 200→1000 Hz sweep under a half-sine swell, with a breath of noise
pub fn spirit_pulse(rng: &mut impl Rng) -> Vec<f32> {
    (0..samples_for(0.8))
        .map(|i| {
            let t = seconds(i);
            let freq = 200.0 + 800.0 * t;
            let amp = 0.4 * (PI * t / 0.8).sin();
            let hiss = 0.1 * (rng.random::<f64>() * 2.0 - 1.0) * amp;
            (amp * (2.0 * PI * freq * t).sin() + hiss) as f32
        })
        .collect()
}

/// Lub-dub: two low thumps 0.1 s apart
pub fn heartbeat() -> Vec<f32> {
    let mut out = Adsr::new(0.01, 0.05, 0.1, 0.5).apply(sine(60.0, 0.15, 0.6));
    out.extend(silence(0.1));
    out.extend(Adsr::new(0.01, 0.05, 0.05, 0.4).apply(sine(50.0, 0.12, 0.4)));
    out
}

/// Falling 1000→700 Hz chirp with a linear fade, echoed
pub fn memory_flash() -> Vec<f32> {
    let flash = (0..samples_for(0.5))
        .map(|i| {
            let t = seconds(i);
            let freq = 1000.0 - 600.0 * t;
            let amp = 0.3 * (1.0 - t / 0.5);
            (amp * (2.0 * PI * freq * t).sin()) as f32
        })
        .collect();
    reverb(flash, 150.0, 0.4)
}

/// Detection alert: 880 Hz tone, 1100 Hz answer 0.15 s in
pub fn alert() -> Vec<f32> {
    let first = Adsr::new(0.001, 0.05, 0.3, 0.3).apply(sine(880.0, 0.3, 0.4));
    let mut second = silence(0.15);
    second.extend(Adsr::new(0.001, 0.03, 0.1, 0.3).apply(sine(1100.0, 0.15, 0.3)));
    mix(&[first, second])
}

/// 5 s of noise under a slow swell
pub fn wind(rng: &mut impl Rng) -> Vec<f32> {
    (0..samples_for(5.0))
        .map(|i| {
            let amp = 0.1 * (0.5 + 0.5 * (seconds(i) * 0.3).sin());
            (amp * (rng.random::<f64>() * 2.0 - 1.0)) as f32
        })
        .collect()
}

/// 5 s of noise with a jittered swell
pub fn water(rng: &mut impl Rng) -> Vec<f32> {
    (0..samples_for(5.0))
        .map(|i| {
            let amp = 0.08 * (0.6 + 0.4 * (seconds(i) * 0.5 + rng.random::<f64>()).sin());
            (amp * (rng.random::<f64>() * 2.0 - 1.0)) as f32
        })
        .collect()
}

/// C5, E5, G5 arpeggio
pub fn item_collect() -> Vec<f32> {
    let short = Adsr::new(0.001, 0.02, 0.1, 0.3);
    let mut out = short.apply(sine(523.0, 0.1, 0.3));
    out.extend(short.apply(sine(659.0, 0.1, 0.3)));
    out.extend(Adsr::new(0.001, 0.02, 0.1, 0.4).apply(sine(784.0, 0.15, 0.3)));
    out
}

/// Rising G major fanfare on triangle waves
pub fn victory() -> Vec<f32> {
    let env = Adsr::new(0.01, 0.05, 0.4, 0.3);
    let fanfare = [392.0, 494.0, 587.0, 784.0]
        .into_iter()
        .flat_map(|f| env.apply(triangle(f, 0.3, 0.4)))
        .collect();
    reverb(fanfare, 200.0, 0.3)
}

/// Uniform noise in `[-spread, spread)` shaped by `env(t)` over an inclusive axis
fn shaped_noise(
    duration: f64,
    spread: f64,
    rng: &mut impl Rng,
    env: impl Fn(f64) -> f64,
) -> Vec<f32> {
    time_axis(duration)
        .map(|t| (rng.random_range(-spread..spread) * env(t)) as f32)
        .collect()
}

/// Rhythm and boss stingers the game loads by name
pub fn stingers(rng: &mut impl Rng) -> Vec<Clip> {
    let mut clips = Vec::new();

    let hide = shaped_noise(0.3, 0.5, rng, |t| {
        (-8.0 * t).exp() * (1.0 - (-30.0 * t).exp())
    });
    clips.push(("hide".to_string(), scale(moving_average(&hide, 60), 0.4)));

    clips.push((
        "dialogue_click".to_string(),
        scale(decaying(800.0, 0.05, 80.0), 0.5),
    ));

    let perfect = add(
        &decaying(440.0, 0.2, 20.0),
        &scale(decaying(880.0, 0.2, 30.0), 0.4),
    );
    clips.push(("beat_hit_perfect".to_string(), scale(perfect, 0.6)));

    clips.push((
        "beat_hit_good".to_string(),
        scale(decaying(350.0, 0.15, 25.0), 0.5),
    ));

    let thud = shaped_noise(0.3, 0.3, rng, |t| (-10.0 * t).exp() * 0.2);
    let miss = add(&decaying(120.0, 0.3, 8.0), &thud);
    clips.push(("beat_miss".to_string(), scale(miss, 0.5)));

    let rumble = shaped_noise(1.0, 0.3, rng, |t| (-6.0 * t).exp());
    let boom = add(&decaying(80.0, 1.0, 4.0), &rumble);
    let transition = add(&boom, &scale(decaying(523.0, 1.0, 10.0), 0.3));
    clips.push(("phase_transition".to_string(), scale(transition, 0.6)));

    let defeat = time_axis(2.0)
        .map(|t| {
            let freq = 500.0 * (-1.5 * t).exp();
            ((2.0 * PI * freq * t).sin() * (-0.8 * t).exp()) as f32
        })
        .collect();
    clips.push(("boss_defeat".to_string(), scale(defeat, 0.5)));

    let caught = add(
        &decaying(200.0, 0.5, 5.0),
        &scale(decaying(150.0, 0.5, 4.0), 0.5),
    );
    clips.push(("caught".to_string(), scale(caught, 0.5)));

    let sparkle = [880.0, 1100.0, 1320.0, 1760.0]
        .into_iter()
        .enumerate()
        .map(|(i, f)| scale(decaying(f, 0.4, 8.0 + 3.0 * i as f64), 0.2))
        .fold(Vec::new(), |acc, partial| add(&acc, &partial));
    clips.push(("collect_orb".to_string(), scale(sparkle, 0.5)));

    clips
}

/// Every sound effect in write order
pub fn sound_effects(rng: &mut impl Rng) -> Vec<Clip> {
    let mut clips: Vec<Clip> = Vec::new();

    for surface in Surface::ALL {
        for i in 0..3 {
            let name = format!("footstep_{}_{i}", surface.name());
            clips.push((name, footstep(surface, rng)));
        }
    }

    clips.push(("spirit_pulse".to_string(), spirit_pulse(rng)));
    clips.push(("drum_hit".to_string(), tabla_hit(Tabla::Low, 0.3, rng)));
    clips.push(("drum_tap".to_string(), tabla_hit(Tabla::High, 0.2, rng)));
    clips.push(("heartbeat".to_string(), heartbeat()));
    clips.push((
        "ui_click".to_string(),
        Adsr::new(0.001, 0.01, 0.0, 0.3).apply(sine(800.0, 0.05, 0.3)),
    ));
    clips.push((
        "ui_hover".to_string(),
        Adsr::new(0.001, 0.005, 0.0, 0.3).apply(sine(600.0, 0.03, 0.2)),
    ));
    clips.push(("memory_flash".to_string(), memory_flash()));
    clips.push(("alert".to_string(), alert()));
    clips.push(("wind_ambient".to_string(), wind(rng)));
    clips.push(("water_ambient".to_string(), water(rng)));

    let door = mix(&[noise(0.3, 0.2, rng), sine(150.0, 0.3, 0.3)]);
    clips.push((
        "door_open".to_string(),
        Adsr::new(0.01, 0.1, 0.2, 0.4).apply(door),
    ));
    clips.push(("item_collect".to_string(), item_collect()));

    let impact = mix(&[
        sine(80.0, 0.4, 0.5),
        noise(0.4, 0.3, rng),
        sine(160.0, 0.4, 0.3),
    ]);
    clips.push((
        "boss_hit".to_string(),
        Adsr::new(0.001, 0.05, 0.2, 0.5).apply(impact),
    ));
    clips.push(("victory".to_string(), victory()));

    clips.extend(stingers(rng));
    clips
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all() -> Vec<Clip> {
        sound_effects(&mut StdRng::seed_from_u64(7))
    }

    fn clip<'a>(clips: &'a [Clip], name: &str) -> &'a [f32] {
        &clips.iter().find(|(n, _)| n == name).unwrap().1
    }

    #[test]
    fn test_clip_names_are_unique() {
        let clips = all();
        let names: std::collections::HashSet<_> = clips.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names.len(), clips.len());
        assert_eq!(clips.len(), 9 + 14 + 9);
        assert!(names.contains("footstep_stone_2"));
        assert!(names.contains("collect_orb"));
    }

    #[test]
    fn test_clip_lengths() {
        let clips = all();
        assert_eq!(clip(&clips, "footstep_grass_0").len(), 3528);
        assert_eq!(clip(&clips, "spirit_pulse").len(), 35280);
        // 0.15 s + 0.1 s gap + 0.12 s
        assert_eq!(clip(&clips, "heartbeat").len(), 6615 + 4410 + 5292);
        assert_eq!(clip(&clips, "item_collect").len(), 4410 + 4410 + 6615);
        assert_eq!(clip(&clips, "victory").len(), 4 * 13230);
        assert_eq!(clip(&clips, "boss_defeat").len(), 88200);
        assert_eq!(clip(&clips, "wind_ambient").len(), 5 * 44_100);
    }

    #[test]
    fn test_footsteps_fade_out() {
        let mut rng = StdRng::seed_from_u64(1);
        for surface in Surface::ALL {
            let step = footstep(surface, &mut rng);
            // Sustain is zero, so the tail is silent
            assert_eq!(*step.last().unwrap(), 0.0);
            assert!(step.iter().any(|s| s.abs() > 0.01));
        }
    }

    #[test]
    fn test_stingers_start_at_rest_and_decay() {
        let clips = all();
        let perfect = clip(&clips, "beat_hit_perfect");
        assert_eq!(perfect[0], 0.0);
        let head = perfect[..800].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let tail = perfect[perfect.len() - 800..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(tail < head * 0.1);
    }

    #[test]
    fn test_hide_is_quiet() {
        let clips = all();
        let hide = clip(&clips, "hide");
        assert_eq!(hide.len(), 13230);
        assert!(hide.iter().all(|s| s.abs() <= 0.2));
    }

    #[test]
    fn test_alert_second_tone_is_delayed() {
        let a = alert();
        assert_eq!(a.len(), 13230);
        let peak = a.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.8).abs() < 1e-4);
    }
}
