//! Effect sprites: pulses, flashes, beat judgements and particles.

use glam::IVec2;
use image::RgbaImage;
use log::info;

use crate::output::save_png;
use crate::params::palette::*;
use crate::params::GeneratorConfig;
use crate::raster::{Canvas, Color, Rect, Style};

/// Judgement shown on the rhythm track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Beat {
    Perfect,
    Good,
    Miss,
}

impl Beat {
    pub const ALL: [Beat; 3] = [Beat::Perfect, Beat::Good, Beat::Miss];

    pub fn name(self) -> &'static str {
        match self {
            Beat::Perfect => "perfect",
            Beat::Good => "good",
            Beat::Miss => "miss",
        }
    }

    fn color(self) -> Color {
        match self {
            Beat::Perfect => GOLD,
            Beat::Good => SKY_BLUE,
            Beat::Miss => DARK_MAGENTA,
        }
    }
}

/// 256×256 expanding ring; alpha falls off 3 per pixel of radius
pub fn spirit_pulse_ring() -> RgbaImage {
    let mut c = Canvas::new(256, 256);
    let center = IVec2::new(128, 128);
    for r in (50..120).step_by(3) {
        let alpha = (255 - (r - 50) * 3).max(0) as u8;
        c.ellipse(
            Rect::around(center, r, r),
            Style::stroke(with_alpha(SPIRIT_PURPLE, alpha), 2),
        );
    }
    c.into_image()
}

/// 128×128 white flash, brightest at the rim, drawn large to small
pub fn memory_flash() -> RgbaImage {
    let mut c = Canvas::new(128, 128);
    for r in (1..=60).rev().step_by(2) {
        let alpha = (200.0 * r as f32 / 60.0) as u8;
        c.dot(IVec2::new(64, 64), r, rgba(255, 255, 255, alpha));
    }
    c.into_image()
}

pub fn beat_indicator(beat: Beat) -> RgbaImage {
    let mut c = Canvas::new(64, 64);
    let color = beat.color();
    c.ellipse(Rect::new(8, 8, 56, 56), Style::outlined(with_alpha(color, 200), BLACK, 2));
    c.ellipse(Rect::new(16, 16, 48, 48), Style::outlined(color, BLACK, 1));
    c.into_image()
}

pub fn footprint() -> RgbaImage {
    let mut c = Canvas::new(32, 48);
    c.ellipse(Rect::new(6, 5, 26, 35), Style::fill(rgba(100, 80, 60, 150)));
    for i in 0..5 {
        let tx = 10 + i * 4;
        c.ellipse(Rect::new(tx - 2, 2, tx + 2, 6), Style::fill(rgba(100, 80, 60, 120)));
    }
    c.into_image()
}

/// 32×32 soft magenta mote, denser toward the rim
pub fn corruption_particle() -> RgbaImage {
    let mut c = Canvas::new(32, 32);
    for r in (1..=14).rev() {
        let alpha = (180.0 * r as f32 / 14.0) as u8;
        c.dot(IVec2::new(16, 16), r, with_alpha(DARK_MAGENTA, alpha));
    }
    c.into_image()
}

/// 64×128 hanging vine, five segments with paired leaves
pub fn vine_obstacle() -> RgbaImage {
    let mut c = Canvas::new(64, 128);
    for i in 0..5 {
        let sx = 32 + (15.0 * (i as f32 * 1.2).sin()) as i32;
        let sy = i * 25;
        let end = IVec2::new(sx + (10.0 * (i as f32).sin()) as i32, sy + 25);
        c.line(IVec2::new(sx, sy), end, FOREST_GREEN, 4);

        c.ellipse(Rect::new(sx - 8, sy + 5, sx + 2, sy + 15), Style::fill(rgb(50, 160, 50)));
        c.ellipse(Rect::new(sx + 2, sy + 10, sx + 12, sy + 20), Style::fill(rgb(40, 140, 40)));
    }
    c.into_image()
}

pub fn generate_all(config: &GeneratorConfig) -> anyhow::Result<()> {
    info!("--- VFX ---");
    let dir = config.layout().vfx_dir();
    save_png(&spirit_pulse_ring(), &dir, "spirit_pulse_ring")?;
    save_png(&memory_flash(), &dir, "memory_flash")?;
    for beat in Beat::ALL {
        save_png(&beat_indicator(beat), &dir, &format!("beat_{}", beat.name()))?;
    }
    save_png(&footprint(), &dir, "footprint")?;
    save_png(&corruption_particle(), &dir, "corruption_particle")?;
    save_png(&vine_obstacle(), &dir, "vine_obstacle")?;
    Ok(())
}
