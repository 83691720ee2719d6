//! Colour palette shared by the sprite, UI and prop generators.
//!
//! Values follow the game's art direction sheet (Puthi manuscript colours).

use image::Rgba;

/// Opaque colour from RGB components
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Colour with explicit alpha
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Same colour, different alpha
pub const fn with_alpha(color: Rgba<u8>, a: u8) -> Rgba<u8> {
    Rgba([color.0[0], color.0[1], color.0[2], a])
}

/// Scale RGB channels by `factor` (truncating), keep alpha
pub fn scaled(color: Rgba<u8>, factor: f32) -> Rgba<u8> {
    let [r, g, b, a] = color.0;
    let s = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    Rgba([s(r), s(g), s(b), a])
}

/// Add a signed offset to each RGB channel, saturating at 0 and 255
pub fn offset(color: Rgba<u8>, dr: i32, dg: i32, db: i32) -> Rgba<u8> {
    let [r, g, b, a] = color.0;
    let o = |c: u8, d: i32| (c as i32 + d).clamp(0, 255) as u8;
    Rgba([o(r, dr), o(g, dg), o(b, db), a])
}

pub const TRANSPARENT: Rgba<u8> = rgba(0, 0, 0, 0);

pub const GOLD: Rgba<u8> = rgb(255, 215, 0);
pub const DARK_GOLD: Rgba<u8> = rgb(184, 134, 11);
pub const TARNISHED_GOLD: Rgba<u8> = rgb(139, 119, 42);
pub const SKY_BLUE: Rgba<u8> = rgb(135, 206, 235);
pub const EARTH_BROWN: Rgba<u8> = rgb(139, 69, 19);
pub const WARM_BROWN: Rgba<u8> = rgb(101, 67, 33);
pub const DARK_SLATE: Rgba<u8> = rgb(47, 79, 79);
pub const DARK_MAGENTA: Rgba<u8> = rgb(139, 0, 88);
pub const HOPE_BLUE: Rgba<u8> = rgb(100, 149, 237);
pub const FOREST_GREEN: Rgba<u8> = rgb(34, 139, 34);
pub const SPIRIT_PURPLE: Rgba<u8> = rgb(75, 0, 130);
pub const TRIUMPH_RED: Rgba<u8> = rgb(220, 20, 60);
pub const WHITE: Rgba<u8> = rgb(255, 255, 255);
pub const BLACK: Rgba<u8> = rgb(0, 0, 0);
pub const SKIN_WARM: Rgba<u8> = rgb(222, 184, 135);
pub const SKIN_LIGHT: Rgba<u8> = rgb(245, 222, 179);
pub const MEKHELA_RED: Rgba<u8> = rgb(178, 34, 34);
pub const MEKHELA_GOLD: Rgba<u8> = rgb(218, 165, 32);
pub const SADOR_WHITE: Rgba<u8> = rgb(255, 248, 240);
pub const HAIR_BLACK: Rgba<u8> = rgb(25, 25, 25);
pub const PARCHMENT: Rgba<u8> = rgb(245, 235, 220);

/// Per-act background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenePalette {
    pub sky: Rgba<u8>,
    pub sky_gradient: Rgba<u8>,
    pub ground: Rgba<u8>,
    pub foliage: Rgba<u8>,
    pub foliage_light: Rgba<u8>,
    pub building: Rgba<u8>,
    pub building_light: Rgba<u8>,
    pub water: Rgba<u8>,
    pub gold_accent: Rgba<u8>,
}

/// Act I: warm daylight at home
pub const ACT1: ScenePalette = ScenePalette {
    sky: rgb(135, 206, 235),
    sky_gradient: rgb(255, 223, 140),
    ground: rgb(139, 119, 42),
    foliage: rgb(34, 139, 34),
    foliage_light: rgb(50, 205, 50),
    building: rgb(139, 69, 19),
    building_light: rgb(210, 180, 140),
    water: rgb(70, 130, 180),
    gold_accent: GOLD,
};

/// Act II: overcast, drained
pub const ACT2: ScenePalette = ScenePalette {
    sky: rgb(105, 105, 105),
    sky_gradient: rgb(60, 60, 80),
    ground: rgb(80, 70, 60),
    foliage: rgb(40, 60, 40),
    foliage_light: rgb(60, 80, 50),
    building: rgb(90, 60, 40),
    building_light: rgb(140, 120, 100),
    water: rgb(50, 70, 90),
    gold_accent: TARNISHED_GOLD,
};

/// Act III: spirit night
pub const ACT3: ScenePalette = ScenePalette {
    sky: rgb(40, 30, 60),
    sky_gradient: rgb(75, 0, 130),
    ground: rgb(60, 50, 70),
    foliage: rgb(20, 40, 30),
    foliage_light: rgb(40, 60, 50),
    building: rgb(70, 50, 60),
    building_light: rgb(100, 80, 90),
    water: rgb(40, 50, 80),
    gold_accent: HOPE_BLUE,
};

/// Act IV: corrupted confrontation
pub const ACT4: ScenePalette = ScenePalette {
    sky: rgb(30, 0, 40),
    sky_gradient: rgb(139, 0, 88),
    ground: rgb(40, 20, 30),
    foliage: rgb(30, 10, 20),
    foliage_light: rgb(60, 20, 40),
    building: rgb(50, 30, 40),
    building_light: rgb(80, 50, 60),
    water: rgb(30, 20, 50),
    gold_accent: TRIUMPH_RED,
};

/// Epilogue: dawn
pub const EPILOGUE: ScenePalette = ScenePalette {
    sky: rgb(255, 200, 150),
    sky_gradient: rgb(255, 140, 100),
    ground: rgb(139, 119, 42),
    foliage: rgb(50, 180, 50),
    foliage_light: rgb(100, 220, 100),
    building: rgb(160, 120, 80),
    building_light: rgb(220, 200, 170),
    water: rgb(100, 180, 220),
    gold_accent: GOLD,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_truncates() {
        assert_eq!(scaled(rgb(34, 139, 34), 0.6), rgb(20, 83, 20));
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(offset(rgb(10, 250, 100), -20, 20, 0), rgb(0, 255, 100));
        assert_eq!(offset(rgba(1, 2, 3, 9), 1, 1, 1).0[3], 9);
    }

    #[test]
    fn test_accent_follows_the_story() {
        assert_eq!(ACT1.gold_accent, GOLD);
        assert_eq!(ACT2.gold_accent, rgb(139, 119, 42));
        // The spirit world trades gold for blue
        assert_eq!(ACT3.gold_accent, rgb(100, 149, 237));
        assert_eq!(ACT3.gold_accent, HOPE_BLUE);
        assert_eq!(ACT4.gold_accent, TRIUMPH_RED);
        assert_eq!(EPILOGUE.gold_accent, GOLD);
    }
}
