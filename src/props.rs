//! Interactable props and story items.

use glam::IVec2;
use image::RgbaImage;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::output::save_png;
use crate::params::palette::*;
use crate::params::GeneratorConfig;
use crate::raster::{polar, Canvas, Rect, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prop {
    Dheki,
    DholDrum,
    NahorFlower,
    Hairpin,
    OilLamp,
    Pot,
    SpiritOrb,
    Gourd,
    Gamosa,
    SpikedBarrel,
}

impl Prop {
    pub const ALL: [Prop; 10] = [
        Prop::Dheki,
        Prop::DholDrum,
        Prop::NahorFlower,
        Prop::Hairpin,
        Prop::OilLamp,
        Prop::Pot,
        Prop::SpiritOrb,
        Prop::Gourd,
        Prop::Gamosa,
        Prop::SpikedBarrel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prop::Dheki => "dheki",
            Prop::DholDrum => "dhol_drum",
            Prop::NahorFlower => "nahor_flower",
            Prop::Hairpin => "hairpin",
            Prop::OilLamp => "oil_lamp",
            Prop::Pot => "pot",
            Prop::SpiritOrb => "spirit_orb",
            Prop::Gourd => "gourd",
            Prop::Gamosa => "gamosa",
            Prop::SpikedBarrel => "spiked_barrel",
        }
    }

    /// Sprite size in pixels
    pub fn size(self) -> (u32, u32) {
        match self {
            Prop::Dheki => (256, 256),
            Prop::DholDrum => (128, 128),
            Prop::Hairpin => (64, 128),
            Prop::SpiritOrb => (48, 48),
            Prop::Gamosa => (128, 64),
            Prop::SpikedBarrel => (96, 96),
            Prop::NahorFlower | Prop::OilLamp | Prop::Pot | Prop::Gourd => (64, 64),
        }
    }

    pub fn draw(self, rng: &mut StdRng) -> RgbaImage {
        let (w, h) = self.size();
        let mut c = Canvas::new(w, h);
        match self {
            Prop::Dheki => dheki(&mut c, rng),
            Prop::DholDrum => dhol_drum(&mut c),
            Prop::NahorFlower => nahor_flower(&mut c),
            Prop::Hairpin => hairpin(&mut c),
            Prop::OilLamp => oil_lamp(&mut c),
            Prop::Pot => pot(&mut c),
            Prop::SpiritOrb => spirit_orb(&mut c),
            Prop::Gourd => gourd(&mut c),
            Prop::Gamosa => gamosa(&mut c),
            Prop::SpikedBarrel => spiked_barrel(&mut c),
        }
        c.into_image()
    }
}

fn p(x: i32, y: i32) -> IVec2 {
    IVec2::new(x, y)
}

/// Foot-operated rice husker, the centrepiece of the Act II puzzle
fn dheki(c: &mut Canvas, rng: &mut StdRng) {
    c.rect(Rect::new(80, 180, 180, 200), Style::outlined(EARTH_BROWN, BLACK, 3));
    // Lever arm
    c.polygon(
        &[p(40, 170), p(220, 140), p(225, 150), p(45, 180)],
        Style::outlined(WARM_BROWN, BLACK, 1),
    );
    // Pestle
    c.rect(Rect::new(210, 130, 230, 200), Style::outlined(EARTH_BROWN, BLACK, 2));
    // Stone mortar
    c.ellipse(Rect::new(190, 190, 250, 230), Style::outlined(rgb(120, 120, 120), BLACK, 3));

    for _ in 0..5 {
        let rx = 210 + rng.random_range(-10..=10);
        let ry = 200 + rng.random_range(-3..=3);
        c.ellipse(Rect::new(rx - 2, ry - 1, rx + 2, ry + 1), Style::fill(SADOR_WHITE));
    }

    // Foot pedal
    c.polygon(
        &[p(30, 175), p(60, 175), p(55, 210), p(25, 210)],
        Style::outlined(WARM_BROWN, BLACK, 2),
    );
}

fn dhol_drum(c: &mut Canvas) {
    let (cx, cy) = (64, 64);
    c.ellipse(
        Rect::new(cx - 35, cy - 20, cx + 35, cy + 20),
        Style::outlined(EARTH_BROWN, BLACK, 3),
    );
    // Leather heads
    c.ellipse(
        Rect::new(cx - 35, cy - 15, cx - 20, cy + 15),
        Style::outlined(SADOR_WHITE, BLACK, 2),
    );
    c.ellipse(
        Rect::new(cx + 20, cy - 15, cx + 35, cy + 15),
        Style::outlined(SADOR_WHITE, BLACK, 2),
    );

    // Lacing
    for i in 0..8 {
        let y = cy - 10 + (12.0 * (i as f32 * 0.8).sin()) as i32;
        c.line(p(cx - 20, y), p(cx + 20, y), MEKHELA_RED, 1);
    }

    c.line(p(cx - 20, cy - 20), p(cx - 20, cy + 20), GOLD, 2);
    c.line(p(cx + 20, cy - 20), p(cx + 20, cy + 20), GOLD, 2);
}

/// Mesua ferrea blossom: four white petals around golden stamens
fn nahor_flower(c: &mut Canvas) {
    let center = p(32, 32);
    for angle in [0.0, 90.0, 180.0, 270.0] {
        let petal = polar(center, 12.0, angle);
        c.ellipse(Rect::around(petal, 8, 8), Style::outlined(WHITE, BLACK, 1));
    }

    c.dot(center, 6, GOLD);
    for angle in (0..360).step_by(30) {
        let stamen = polar(center, 8.0, angle as f32);
        c.line(center, stamen, DARK_GOLD, 1);
        c.dot(stamen, 1, GOLD);
    }
}

fn hairpin(c: &mut Canvas) {
    c.line(p(32, 20), p(32, 110), GOLD, 3);
    c.ellipse(Rect::new(20, 5, 44, 35), Style::outlined(GOLD, DARK_GOLD, 2));

    let head = p(32, 20);
    for angle in (0..360).step_by(60) {
        c.dot(polar(head, 8.0, angle as f32), 3, MEKHELA_RED);
    }
    c.ellipse(Rect::new(29, 17, 35, 23), Style::fill(GOLD));
}

/// Saaki oil lamp with a two-tone flame
fn oil_lamp(c: &mut Canvas) {
    c.polygon(
        &[p(20, 50), p(44, 50), p(40, 35), p(24, 35)],
        Style::outlined(rgb(180, 140, 60), BLACK, 2),
    );
    c.rect(Rect::new(26, 32, 38, 36), Style::fill(rgb(200, 160, 40)));

    c.line(p(32, 32), p(32, 22), BLACK, 2);
    c.polygon(&[p(32, 10), p(27, 22), p(37, 22)], Style::fill(rgb(255, 200, 50)));
    c.polygon(&[p(32, 14), p(29, 22), p(35, 22)], Style::fill(rgb(255, 150, 30)));

    // Glow replaces the flame tip with a faint halo
    c.ellipse(Rect::new(22, 5, 42, 28), Style::fill(rgba(255, 215, 0, 30)));
}

fn pot(c: &mut Canvas) {
    let clay = rgb(180, 120, 60);
    c.ellipse(Rect::new(12, 20, 52, 55), Style::outlined(clay, BLACK, 2));
    c.rect(Rect::new(22, 12, 42, 22), Style::outlined(clay, BLACK, 2));
    c.ellipse(Rect::new(18, 8, 46, 16), Style::outlined(rgb(160, 100, 40), BLACK, 2));
    c.arc(Rect::new(14, 30, 50, 45), 0.0, 180.0, MEKHELA_RED, 2);
}

fn spirit_orb(c: &mut Canvas) {
    let center = p(24, 24);
    let layers = [
        (20, rgba(75, 0, 130, 40)),
        (15, rgba(100, 50, 180, 80)),
        (10, rgba(150, 100, 220, 160)),
        (5, rgba(200, 180, 255, 220)),
        (2, WHITE),
    ];
    for (r, color) in layers {
        c.dot(center, r, color);
    }
}

fn gourd(c: &mut Canvas) {
    c.ellipse(Rect::new(15, 25, 50, 55), Style::outlined(rgb(180, 160, 80), BLACK, 2));
    c.ellipse(Rect::new(22, 10, 42, 30), Style::outlined(rgb(170, 150, 70), BLACK, 2));
    // Stem
    c.rect(Rect::new(30, 5, 34, 12), Style::outlined(rgb(80, 120, 40), BLACK, 1));
}

/// Assamese gamosa: white cloth with woven red borders and ends
fn gamosa(c: &mut Canvas) {
    c.rect(Rect::new(5, 10, 123, 54), Style::outlined(WHITE, BLACK, 2));

    for y in [12, 52] {
        c.line(p(7, y), p(121, y), MEKHELA_RED, 3);
    }
    for x in (10..120).step_by(8) {
        c.line(p(x, 13), p(x, 15), MEKHELA_RED, 2);
        c.line(p(x, 50), p(x, 52), MEKHELA_RED, 2);
    }

    c.rect(Rect::new(5, 10, 25, 54), Style::outlined(MEKHELA_RED, BLACK, 1));
    c.rect(Rect::new(103, 10, 123, 54), Style::outlined(MEKHELA_RED, BLACK, 1));

    for sx in [15, 113] {
        c.ellipse(Rect::new(sx - 4, 25, sx + 4, 39), Style::fill(GOLD));
    }
}

/// Boss-fight obstacle: banded barrel with twelve spikes
fn spiked_barrel(c: &mut Canvas) {
    let center = p(48, 48);
    c.ellipse(Rect::around(center, 25, 25), Style::outlined(rgb(100, 60, 30), BLACK, 3));

    let band = rgb(60, 40, 20);
    c.ellipse(Rect::around(center, 22, 22), Style::stroke(band, 2));
    c.ellipse(Rect::around(center, 15, 15), Style::stroke(band, 2));

    for angle in (0..360).step_by(30) {
        let base = polar(center, 25.0, angle as f32);
        let tip = polar(center, 35.0, angle as f32);
        c.polygon(
            &[base - p(3, 0), tip, base + p(3, 0)],
            Style::outlined(rgb(80, 80, 80), BLACK, 1),
        );
    }
}

pub fn generate_all(config: &GeneratorConfig) -> anyhow::Result<()> {
    info!("--- PROPS ---");
    let dir = config.layout().props_dir();
    let mut rng = StdRng::seed_from_u64(config.seed_for("props"));
    for prop in Prop::ALL {
        save_png(&prop.draw(&mut rng), &dir, prop.name())?;
    }
    Ok(())
}
