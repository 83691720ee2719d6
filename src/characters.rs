//! Character sprite sheets in Puthi manuscript style.
//!
//! Bold black outlines over flat fills, one 128×128 frame per animation
//! step. The frame index drives small `sway`/`bob` offsets so an idle loop
//! breathes without any per-limb rig.

use glam::IVec2;
use image::RgbaImage;
use log::info;

use crate::output::save_png;
use crate::params::palette::*;
use crate::params::sprite_constants::{FRAME_SIZE, PORTRAIT_SIZE, SHEET_FRAMES, SHEET_WIDTH};
use crate::params::GeneratorConfig;
use crate::raster::{polar, Canvas, Color, Rect, Style};

/// Outline width for the manuscript look
const OUTLINE_WIDTH: u32 = 3;

/// Every character the game animates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Character {
    TejimolaChild,
    TejimolaSpirit,
    Dom,
    Ranima,
    Father,
    RanimaCorrupted,
}

impl Character {
    pub const ALL: [Character; 6] = [
        Character::TejimolaChild,
        Character::TejimolaSpirit,
        Character::Dom,
        Character::Ranima,
        Character::Father,
        Character::RanimaCorrupted,
    ];

    /// File stem used for the sheet and portrait
    pub fn name(self) -> &'static str {
        match self {
            Character::TejimolaChild => "tejimola_child",
            Character::TejimolaSpirit => "tejimola_spirit",
            Character::Dom => "dom",
            Character::Ranima => "ranima",
            Character::Father => "father",
            Character::RanimaCorrupted => "ranima_corrupted",
        }
    }

    /// Draw one 128×128 animation frame
    pub fn frame(self, index: u32) -> RgbaImage {
        match self {
            Character::TejimolaChild => tejimola_child(index),
            Character::TejimolaSpirit => tejimola_spirit(index),
            Character::Dom => dom(index),
            Character::Ranima => ranima(index),
            Character::Father => father(index),
            Character::RanimaCorrupted => ranima_corrupted(index),
        }
        .into_image()
    }
}

/// Offset helper: all coordinates in a character are relative to its centre
#[derive(Clone, Copy)]
struct Anchor {
    cx: i32,
    cy: i32,
}

impl Anchor {
    fn p(self, dx: i32, dy: i32) -> IVec2 {
        IVec2::new(self.cx + dx, self.cy + dy)
    }

    fn r(self, x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(self.cx + x0, self.cy + y0, self.cx + x1, self.cy + y1)
    }
}

fn outlined(fill: Color) -> Style {
    Style::outlined(fill, BLACK, OUTLINE_WIDTH)
}

/// `trunc(amplitude · sin(frame · rate))`
fn wobble(frame: u32, amplitude: f32, rate: f32) -> i32 {
    (amplitude * (frame as f32 * rate).sin()) as i32
}

fn blank_frame() -> Canvas {
    Canvas::new(FRAME_SIZE, FRAME_SIZE)
}

fn tejimola_child(frame: u32) -> Canvas {
    let mut c = blank_frame();
    let o = Anchor { cx: 64, cy: 64 };
    let sway = wobble(frame, 3.0, 0.8);
    let bob = wobble(frame, 2.0, 1.2);

    // Mekhela
    c.polygon(
        &[o.p(-18, -5 + bob), o.p(18, -5 + bob), o.p(22, 45), o.p(-22, 45)],
        outlined(MEKHELA_RED),
    );
    // Sador drape
    c.polygon(
        &[
            o.p(-16 + sway, -5 + bob),
            o.p(8 + sway, -5 + bob),
            o.p(12 + sway, 15 + bob),
            o.p(-20 + sway, 18 + bob),
        ],
        outlined(SADOR_WHITE),
    );
    c.line(o.p(-22, 43), o.p(22, 43), MEKHELA_GOLD, 3);
    c.line(o.p(-21, 40), o.p(21, 40), GOLD, 1);

    // Arms
    c.line(o.p(-18, bob), o.p(-25 + sway, 20 + bob), SKIN_WARM, 6);
    c.ellipse(o.r(-28 + sway, 18 + bob, -22 + sway, 24 + bob), outlined(SKIN_WARM));
    c.line(o.p(18, bob), o.p(25 + sway, 18 + bob), SKIN_WARM, 6);
    c.ellipse(o.r(22 + sway, 16 + bob, 28 + sway, 22 + bob), outlined(SKIN_WARM));

    c.line(o.p(-8, 45), o.p(-10, 55), SKIN_WARM, 5);
    c.line(o.p(8, 45), o.p(10, 55), SKIN_WARM, 5);

    // Head and long hair
    c.ellipse(o.r(-14, -32 + bob, 14, -4 + bob), outlined(SKIN_WARM));
    c.arc(o.r(-16, -36 + bob, 16, -10 + bob), 180.0, 360.0, HAIR_BLACK, 4);
    c.line(o.p(-14, -20 + bob), o.p(-18, 5 + bob), HAIR_BLACK, 3);
    c.line(o.p(14, -20 + bob), o.p(18, 5 + bob), HAIR_BLACK, 3);
    c.ellipse(o.r(-8, -38 + bob, 8, -30 + bob), outlined(HAIR_BLACK));

    // Kopou orchid in the bun
    c.ellipse(o.r(6, -36 + bob, 14, -28 + bob), outlined(GOLD));
    c.ellipse(o.r(8, -34 + bob, 12, -30 + bob), Style::fill(TRIUMPH_RED));

    // Large manuscript eyes
    c.ellipse(o.r(-9, -22 + bob, -3, -16 + bob), outlined(WHITE));
    c.ellipse(o.r(-7, -20 + bob, -4, -17 + bob), Style::fill(BLACK));
    c.ellipse(o.r(3, -22 + bob, 9, -16 + bob), outlined(WHITE));
    c.ellipse(o.r(4, -20 + bob, 7, -17 + bob), Style::fill(BLACK));

    c.arc(o.r(-6, -16 + bob, 6, -8 + bob), 0.0, 180.0, BLACK, 2);
    c.ellipse(o.r(-2, -24 + bob, 2, -20 + bob), Style::fill(TRIUMPH_RED));
    c.arc(o.r(-10, -6 + bob, 10, 2 + bob), 0.0, 180.0, GOLD, 2);
    c
}

fn tejimola_spirit(frame: u32) -> Canvas {
    let mut c = tejimola_child(frame);
    c.map_opaque(|p| {
        let [r, g, b, a] = p.0;
        rgba(
            r.saturating_add(60),
            g.saturating_add(60),
            b.saturating_add(80),
            (a as f32 * 0.6) as u8,
        )
    });

    for angle in (0..360).step_by(30) {
        let rad = (angle as f32).to_radians();
        let gx = 64 + (30.0 * rad.cos()) as i32;
        let gy = 40 + (20.0 * rad.sin()) as i32;
        c.dot(IVec2::new(gx, gy), 3, rgba(200, 200, 255, 40));
    }
    c
}

fn dom(frame: u32) -> Canvas {
    let mut c = blank_frame();
    let o = Anchor { cx: 64, cy: 60 };
    let sway = wobble(frame, 2.0, 0.6);
    let bob = wobble(frame, 1.0, 1.0);

    // Dhoti and bare chest
    c.polygon(
        &[o.p(-20, -8 + bob), o.p(20, -8 + bob), o.p(18, 48), o.p(-18, 48)],
        outlined(SADOR_WHITE),
    );
    c.rect(o.r(-18, -20 + bob, 18, -5 + bob), outlined(SKIN_WARM));

    // Gamosa over the shoulder
    c.polygon(
        &[
            o.p(-16 + sway, -18 + bob),
            o.p(5 + sway, -20 + bob),
            o.p(8 + sway, 5 + bob),
            o.p(-12 + sway, 8 + bob),
        ],
        outlined(WHITE),
    );
    c.line(o.p(-14 + sway, -14 + bob), o.p(3 + sway, -16 + bob), TRIUMPH_RED, 2);
    c.line(o.p(-13 + sway, -8 + bob), o.p(4 + sway, -10 + bob), TRIUMPH_RED, 2);

    c.line(o.p(-20, -12 + bob), o.p(-28 + sway, 8 + bob), SKIN_WARM, 7);
    c.ellipse(o.r(-31 + sway, 6 + bob, -25 + sway, 12 + bob), outlined(SKIN_WARM));
    c.line(o.p(20, -12 + bob), o.p(28 + sway, 8 + bob), SKIN_WARM, 7);
    c.ellipse(o.r(25 + sway, 6 + bob, 31 + sway, 12 + bob), outlined(SKIN_WARM));

    // Dhol hangs from the neck for the first half of the loop
    if frame % 8 < 4 {
        let d = Anchor {
            cx: o.cx + 15,
            cy: o.cy + 10 + bob,
        };
        c.ellipse(d.r(-12, -8, 12, 8), outlined(EARTH_BROWN));
        c.ellipse(d.r(-12, -6, -6, 6), Style::outlined(SKIN_LIGHT, BLACK, 2));
        c.ellipse(d.r(6, -6, 12, 6), Style::outlined(SKIN_LIGHT, BLACK, 2));
        c.line(d.p(-5, -8), o.p(5, -18 + bob), WARM_BROWN, 2);
    }

    c.ellipse(o.r(-15, -42 + bob, 15, -14 + bob), outlined(SKIN_WARM));

    // Messy hair radiating around the crown
    let crown = o.p(0, -28 + bob);
    for angle in (160..380).step_by(15) {
        let rad = (angle as f32).to_radians();
        let inner = IVec2::new(
            crown.x + (10.0 * rad.cos()) as i32,
            crown.y + (8.0 * rad.sin()) as i32,
        );
        let outer = IVec2::new(
            crown.x + (16.0 * rad.cos()) as i32,
            crown.y + (14.0 * rad.sin()) as i32,
        );
        c.line(inner, outer, HAIR_BLACK, 2);
    }

    c.ellipse(o.r(-10, -32 + bob, -4, -26 + bob), outlined(WHITE));
    c.ellipse(o.r(-8, -30 + bob, -5, -27 + bob), Style::fill(WARM_BROWN));
    c.ellipse(o.r(4, -32 + bob, 10, -26 + bob), outlined(WHITE));
    c.ellipse(o.r(5, -30 + bob, 8, -27 + bob), Style::fill(WARM_BROWN));

    c.arc(o.r(-5, -24 + bob, 5, -18 + bob), 10.0, 170.0, BLACK, 2);

    // Stubble
    for i in 0..8 {
        let top = o.p(-4 + i, -18 + bob);
        c.line(top, top + IVec2::new(0, 3), rgba(80, 80, 80, 120), 1);
    }

    // Third-eye spirit mark
    c.ellipse(o.r(-2, -36 + bob, 2, -32 + bob), Style::fill(SPIRIT_PURPLE));

    c.line(o.p(-8, 48), o.p(-10, 58), SKIN_WARM, 5);
    c.line(o.p(8, 48), o.p(10, 58), SKIN_WARM, 5);
    c
}

fn ranima(frame: u32) -> Canvas {
    let mut c = blank_frame();
    let o = Anchor { cx: 64, cy: 58 };
    let sway = wobble(frame, 1.0, 0.4);

    c.polygon(
        &[o.p(-22, -10), o.p(22, -10), o.p(25, 50), o.p(-25, 50)],
        outlined(DARK_MAGENTA),
    );
    c.polygon(
        &[
            o.p(-20 + sway, -10),
            o.p(10 + sway, -12),
            o.p(14 + sway, 20),
            o.p(-24 + sway, 22),
        ],
        outlined(DARK_SLATE),
    );
    c.line(o.p(-25, 48), o.p(25, 48), TARNISHED_GOLD, 3);

    // Commanding arms
    c.line(o.p(-22, -4), o.p(-32 + sway, 12), SKIN_LIGHT, 6);
    c.line(o.p(22, -4), o.p(30 + sway, 15), SKIN_LIGHT, 6);

    c.ellipse(o.r(-15, -42, 15, -14), outlined(SKIN_LIGHT));
    c.arc(o.r(-17, -46, 17, -20), 180.0, 360.0, HAIR_BLACK, 5);
    c.ellipse(o.r(-6, -48, 6, -40), outlined(HAIR_BLACK));

    // Narrow, piercing eyes under hard brows
    c.line(o.p(-11, -30), o.p(-3, -28), BLACK, 2);
    c.ellipse(o.r(-9, -30, -5, -27), Style::fill(WHITE));
    c.ellipse(o.r(-8, -29, -6, -27), Style::fill(BLACK));
    c.line(o.p(3, -28), o.p(11, -30), BLACK, 2);
    c.ellipse(o.r(5, -30, 9, -27), Style::fill(WHITE));
    c.ellipse(o.r(6, -29, 8, -27), Style::fill(BLACK));

    c.line(o.p(-5, -20), o.p(5, -20), BLACK, 2);
    c.line(o.p(-5, -20), o.p(-7, -22), BLACK, 1);
    c.line(o.p(5, -20), o.p(7, -22), BLACK, 1);

    c.ellipse(o.r(-2, -34, 2, -30), Style::fill(DARK_MAGENTA));
    c.arc(o.r(-12, -14, 12, -4), 0.0, 180.0, TARNISHED_GOLD, 3);

    c.line(o.p(-8, 50), o.p(-10, 58), SKIN_LIGHT, 5);
    c.line(o.p(8, 50), o.p(10, 58), SKIN_LIGHT, 5);
    c
}

fn father(frame: u32) -> Canvas {
    let mut c = blank_frame();
    let o = Anchor { cx: 64, cy: 58 };
    let bob = wobble(frame, 1.0, 0.8);

    // Kurta over dhoti
    c.polygon(
        &[o.p(-22, -12 + bob), o.p(22, -12 + bob), o.p(20, 48), o.p(-20, 48)],
        outlined(EARTH_BROWN),
    );
    c.rect(o.r(-18, 20, 18, 48), outlined(SADOR_WHITE));
    c.line(o.p(-2, -12 + bob), o.p(-2, 20), GOLD, 2);
    c.line(o.p(2, -12 + bob), o.p(2, 20), GOLD, 2);

    c.line(o.p(-22, -6 + bob), o.p(-28, 12 + bob), SKIN_WARM, 6);
    c.line(o.p(22, -6 + bob), o.p(28, 12 + bob), SKIN_WARM, 6);

    c.ellipse(o.r(-16, -44 + bob, 16, -14 + bob), outlined(SKIN_WARM));
    c.arc(o.r(-18, -48 + bob, 18, -22 + bob), 180.0, 360.0, HAIR_BLACK, 5);

    // Mustache
    c.arc(o.r(-8, -22 + bob, 0, -16 + bob), 0.0, 180.0, HAIR_BLACK, 2);
    c.arc(o.r(0, -22 + bob, 8, -16 + bob), 0.0, 180.0, HAIR_BLACK, 2);

    c.ellipse(o.r(-10, -34 + bob, -4, -28 + bob), outlined(WHITE));
    c.ellipse(o.r(-8, -32 + bob, -5, -29 + bob), Style::fill(WARM_BROWN));
    c.ellipse(o.r(4, -34 + bob, 10, -28 + bob), outlined(WHITE));
    c.ellipse(o.r(5, -32 + bob, 8, -29 + bob), Style::fill(WARM_BROWN));

    c.arc(o.r(-6, -24 + bob, 6, -16 + bob), 10.0, 170.0, BLACK, 2);
    c
}

fn ranima_corrupted(frame: u32) -> Canvas {
    let mut c = ranima(frame);
    c.map_opaque(|p| {
        let [r, g, b, a] = p.0;
        rgba(
            (r as f32 * 0.6 + 80.0).min(255.0) as u8,
            (g as f32 * 0.3) as u8,
            (b as f32 * 0.5 + 60.0).min(255.0) as u8,
            a,
        )
    });

    // Tendrils rotate 10° per frame
    let root = IVec2::new(64, 40);
    for i in 0..8 {
        let tip = polar(root, 35.0, (i * 45 + frame * 10) as f32);
        c.line(root, tip, rgba(139, 0, 88, 150), 2);
        c.dot(tip, 3, rgba(75, 0, 130, 120));
    }
    c
}

/// Lay `frames` frames of `character` out in 4 columns of square frames
pub fn sprite_sheet(character: Character, frames: u32) -> RgbaImage {
    let cols = SHEET_WIDTH / FRAME_SIZE;
    let rows = frames.div_ceil(cols);
    let mut sheet = Canvas::new(SHEET_WIDTH, rows * FRAME_SIZE);

    for i in 0..frames {
        let x = (i % cols) * FRAME_SIZE;
        let y = (i / cols) * FRAME_SIZE;
        sheet.paste(&character.frame(i), x as i64, y as i64);
    }
    sheet.into_image()
}

/// Idle frame scaled up for dialogue portraits
pub fn portrait(character: Character) -> RgbaImage {
    Canvas::from_image(character.frame(0)).resized_nearest(PORTRAIT_SIZE, PORTRAIT_SIZE)
}

/// Write every character's sheet and portrait
pub fn generate_all(config: &GeneratorConfig) -> anyhow::Result<()> {
    info!("--- CHARACTERS ---");
    let dir = config.layout().characters_dir();
    for character in Character::ALL {
        let sheet = sprite_sheet(character, SHEET_FRAMES);
        save_png(&sheet, &dir, &format!("{}_spritesheet", character.name()))?;
        info!("  {} ({} frames)", character.name(), SHEET_FRAMES);
        save_png(&portrait(character), &dir, &format!("{}_portrait", character.name()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn opaque_count(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_sheet_layout_matches_importer() {
        let sheet = sprite_sheet(Character::Dom, 8);

        // 4 columns of square frames, rows derived from height
        assert_eq!(sheet.width(), 512);
        assert_eq!(sheet.height(), 256);
        assert_eq!(sheet.width() / 4, sheet.height() / 2);
    }

    #[test]
    fn test_partial_last_row() {
        let sheet = sprite_sheet(Character::Father, 5);
        assert_eq!(sheet.height(), 256);
    }

    #[test]
    fn test_frames_are_drawn_and_bordered() {
        for character in Character::ALL {
            let frame = character.frame(0);
            assert_eq!(frame.dimensions(), (128, 128));
            assert!(opaque_count(&frame) > 1000, "{}", character.name());
            // Corners stay transparent so frames tile cleanly
            assert_eq!(frame.get_pixel(0, 0).0[3], 0);
            assert_eq!(frame.get_pixel(127, 127).0[3], 0);
        }
    }

    #[test]
    fn test_animation_changes_frames() {
        assert_ne!(
            Character::TejimolaChild.frame(0),
            Character::TejimolaChild.frame(1)
        );
        // Drum disappears in the second half of Dom's loop
        assert_ne!(Character::Dom.frame(0), Character::Dom.frame(4));
    }

    #[test]
    fn test_spirit_is_translucent() {
        let spirit = Character::TejimolaSpirit.frame(0);
        let max_alpha = spirit.pixels().map(|p| p.0[3]).max().unwrap_or(0);

        assert!(max_alpha > 0);
        assert!(max_alpha <= 153);
    }

    #[test]
    fn test_corrupted_has_no_bright_green() {
        let boss = Character::RanimaCorrupted.frame(0);
        assert!(boss
            .pixels()
            .filter(|p| p.0[3] == 255)
            .all(|p| p.0[1] <= 77));
    }

    #[test]
    fn test_portrait_is_nearest_upscale() {
        let frame = Character::Ranima.frame(0);
        let big = portrait(Character::Ranima);
        let palette: HashSet<[u8; 4]> = frame.pixels().map(|p| p.0).collect();

        assert_eq!(big.dimensions(), (256, 256));
        // Nearest sampling never invents blended colours
        assert!(big.pixels().all(|p| palette.contains(&p.0)));
    }
}
