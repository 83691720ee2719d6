//! Four-layer parallax backgrounds for each act.
//!
//! Layers are drawn far to near:
//! - Sky (gradient, sun or moon, clouds)
//! - Background (distant hills, river, small trees)
//! - Midground (ground, stilt houses, trees, path)
//! - Foreground (grass, flowers or fireflies, ornamental border)
//!
//! Each act draws from its own seeded RNG so acts can be regenerated
//! individually without changing the others.

use glam::IVec2;
use image::RgbaImage;
use log::info;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::output::save_png;
use crate::params::palette::{self, offset, rgb, rgba, scaled, ScenePalette, BLACK};
use crate::params::sprite_constants::{BACKGROUND_HEIGHT, BACKGROUND_WIDTH};
use crate::params::GeneratorConfig;
use crate::raster::{polar, Canvas, Color, Rect, Style};

const WIDTH: i32 = BACKGROUND_WIDTH as i32;
const HEIGHT: i32 = BACKGROUND_HEIGHT as i32;

/// Story act a background set belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Act {
    Act1,
    Act2,
    Act3,
    Act4,
    Epilogue,
}

impl Act {
    pub const ALL: [Act; 5] = [Act::Act1, Act::Act2, Act::Act3, Act::Act4, Act::Epilogue];

    /// Lowercase key, also used to derive the act's seed
    pub fn name(self) -> &'static str {
        match self {
            Act::Act1 => "act1",
            Act::Act2 => "act2",
            Act::Act3 => "act3",
            Act::Act4 => "act4",
            Act::Epilogue => "epilogue",
        }
    }

    /// Output directory name under `Art/Backgrounds`
    pub fn dir_name(self) -> &'static str {
        match self {
            Act::Act1 => "Act1",
            Act::Act2 => "Act2",
            Act::Act3 => "Act3",
            Act::Act4 => "Act4",
            Act::Epilogue => "Epilogue",
        }
    }

    pub fn palette(self) -> &'static ScenePalette {
        match self {
            Act::Act1 => &palette::ACT1,
            Act::Act2 => &palette::ACT2,
            Act::Act3 => &palette::ACT3,
            Act::Act4 => &palette::ACT4,
            Act::Epilogue => &palette::EPILOGUE,
        }
    }

    /// Daylight acts get a sun, white clouds and flowers
    fn is_bright(self) -> bool {
        matches!(self, Act::Act1 | Act::Epilogue)
    }

    /// Night acts get a moon and fireflies
    fn is_night(self) -> bool {
        matches!(self, Act::Act3 | Act::Act4)
    }
}

/// Foliage silhouette for [`draw_tree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeStyle {
    /// Two stacked ellipses
    Normal,
    /// Nahor: five spreading ellipses with white blossoms
    Nahor,
    /// Bamboo: three stalks with nodes and leaves
    Bamboo,
}

/// The four rendered layers of one act
pub struct ActLayers {
    pub sky: RgbaImage,
    pub background: RgbaImage,
    pub midground: RgbaImage,
    pub foreground: RgbaImage,
}

impl ActLayers {
    /// Far-to-near with their file stems
    pub fn named(&self) -> [(&'static str, &RgbaImage); 4] {
        [
            ("layer4_sky", &self.sky),
            ("layer3_background", &self.background),
            ("layer2_midground", &self.midground),
            ("layer1_foreground", &self.foreground),
        ]
    }
}

fn blank_layer() -> Canvas {
    Canvas::new(BACKGROUND_WIDTH, BACKGROUND_HEIGHT)
}

/// Draw a tree whose trunk top sits at `(x, y)`
pub fn draw_tree(
    canvas: &mut Canvas,
    rng: &mut StdRng,
    base: IVec2,
    scale: f32,
    foliage: Color,
    trunk: Color,
    style: TreeStyle,
) {
    let s = |k: f32| (k * scale) as i32;
    let (x, y) = (base.x, base.y);
    let edged = |fill| Style::outlined(fill, BLACK, 2);

    canvas.rect(Rect::new(x - s(3.0), y, x + s(3.0), y + s(30.0)), edged(trunk));

    match style {
        TreeStyle::Nahor => {
            for i in 0..5 {
                let ox = s((i - 2) as f32 * 12.0);
                let oy = s(-(i as f32) * 3.0);
                canvas.ellipse(
                    Rect::new(
                        x + ox - s(18.0),
                        y - s(20.0) + oy,
                        x + ox + s(18.0),
                        y + s(5.0) + oy,
                    ),
                    edged(foliage),
                );
            }
            for _ in 0..8 {
                let bx = x + rng.random_range(s(-15.0)..=s(15.0));
                let by = y - rng.random_range(s(5.0)..=s(18.0));
                let blossom = IVec2::new(bx, by);
                canvas.dot(blossom, 3, palette::WHITE);
                canvas.dot(blossom, 1, palette::GOLD);
            }
        }
        TreeStyle::Bamboo => {
            for i in -1..=1 {
                let bx = x + i * s(6.0);
                canvas.rect(
                    Rect::new(bx - s(2.0), y - s(40.0), bx + s(2.0), y + s(30.0)),
                    Style::outlined(rgb(80, 140, 60), BLACK, 1),
                );
                for j in 0..4 {
                    let ny = y - s(j as f32 * 10.0);
                    canvas.line(
                        IVec2::new(bx - s(2.0), ny),
                        IVec2::new(bx + s(2.0), ny),
                        rgb(40, 80, 30),
                        2,
                    );
                }
                for j in 0..3 {
                    let leaf = IVec2::new(bx, y - s(j as f32 * 12.0));
                    canvas.line(leaf, leaf + IVec2::new(s(15.0), -s(5.0)), foliage, 2);
                    canvas.line(leaf, leaf - IVec2::new(s(12.0), s(4.0)), foliage, 2);
                }
            }
        }
        TreeStyle::Normal => {
            canvas.ellipse(
                Rect::new(x - s(15.0), y - s(25.0), x + s(15.0), y + s(5.0)),
                edged(foliage),
            );
            canvas.ellipse(
                Rect::new(x - s(10.0), y - s(30.0), x + s(10.0), y - s(5.0)),
                edged(foliage),
            );
        }
    }
}

/// Chang ghar: a raised house on three stilts with the wall box at
/// `(x, y, w, h)`
pub fn draw_stilt_house(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, scene: &ScenePalette) {
    let wall = scene.building_light;

    for i in 1..=3 {
        let sx = x + w * i / 4;
        canvas.rect(
            Rect::new(sx - 3, y + h, sx + 3, y + h + 30),
            Style::outlined(rgb(80, 60, 40), BLACK, 1),
        );
    }

    canvas.rect(Rect::new(x, y, x + w, y + h), Style::outlined(wall, BLACK, 3));

    // Bamboo wall texture
    let grain = offset(wall, -20, -20, -20);
    for i in (0..w).step_by(15) {
        canvas.line(IVec2::new(x + i, y), IVec2::new(x + i, y + h), grain, 1);
    }

    let roof = [
        IVec2::new(x - 10, y),
        IVec2::new(x + w + 10, y),
        IVec2::new(x + w / 2, y - h / 2),
    ];
    canvas.polygon(&roof, Style::outlined(scene.building, BLACK, 3));

    let (wx, wy) = (x + w / 3, y + h / 4);
    canvas.rect(
        Rect::new(wx, wy, wx + w / 5, wy + h / 3),
        Style::outlined(scene.gold_accent, BLACK, 2),
    );
    canvas.line(
        IVec2::new(wx + w / 10, wy),
        IVec2::new(wx + w / 10, wy + h / 3),
        BLACK,
        2,
    );

    let (dx, dy) = (x + w * 2 / 3 - 5, y + h / 3);
    canvas.rect(
        Rect::new(dx, dy, dx + w / 6, y + h),
        Style::outlined(scene.gold_accent, BLACK, 2),
    );
}

/// Layer 4: gradient sky with sun or moon and clouds
pub fn sky_layer(act: Act, rng: &mut StdRng) -> RgbaImage {
    let scene = act.palette();
    let mut c = blank_layer();
    c.vertical_gradient(scene.sky, scene.sky_gradient);

    draw_sun_or_moon(&mut c, act);

    let (clouds, cloud_color) = if act.is_bright() {
        (5, rgba(255, 255, 255, 120))
    } else {
        (3, rgba(100, 100, 120, 80))
    };
    for _ in 0..clouds {
        let cx = rng.random_range(100..=WIDTH - 200);
        let cy = rng.random_range(50..=250);
        for j in 0..4 {
            let puff = IVec2::new(cx + j * 25 - 35, cy + rng.random_range(-10..=10));
            c.ellipse(Rect::around(puff, 25, 15), Style::fill(cloud_color));
        }
    }
    c.into_image()
}

/// Golden sun with rays by day, crescent moon by night, nothing otherwise
fn draw_sun_or_moon(c: &mut Canvas, act: Act) {
    let scene = act.palette();
    if act.is_bright() {
        let sun = IVec2::new(WIDTH - 300, 150);
        c.dot(sun, 60, rgb(255, 200, 50));
        for angle in (0..360).step_by(20) {
            c.line(sun, polar(sun, 90.0, angle as f32), rgba(255, 215, 0, 100), 2);
        }
    } else if act.is_night() {
        let moon = IVec2::new(WIDTH - 250, 120);
        c.dot(moon, 40, rgb(200, 200, 220));
        // Crescent: bite out of the disc in the sky colour
        c.ellipse(
            Rect::new(moon.x - 30, moon.y - 35, moon.x + 10, moon.y + 35),
            Style::fill(scene.sky),
        );
    }
}

/// Layer 3: ridge hills, distant river and small trees
pub fn background_layer(act: Act, rng: &mut StdRng) -> RgbaImage {
    let scene = act.palette();
    let mut c = blank_layer();
    let perlin = Perlin::new(rng.random());
    let hill = scaled(scene.foliage, 0.6);

    for i in 0..3 {
        let hx = i * 700;
        let hy = HEIGHT - 400 + i * 30;
        let mut ridge: Vec<IVec2> = (hx - 100..hx + 800)
            .step_by(10)
            .map(|x| {
                let swell = (80.0 * ((x - hx) as f32 * 0.005).sin()) as i32;
                // Noise jitter in [0, 20)
                let n = perlin.get([x as f64 * 0.013, i as f64 + 0.5]);
                let jitter = (((n + 1.0) * 10.0) as i32).clamp(0, 19);
                IVec2::new(x, hy - swell - jitter)
            })
            .collect();
        ridge.push(IVec2::new(hx + 800, HEIGHT));
        ridge.push(IVec2::new(hx - 100, HEIGHT));
        c.polygon(&ridge, Style::fill(hill));
    }

    draw_river(&mut c, &perlin, HEIGHT - 350, 60, scene.water);

    for _ in 0..15 {
        let tx = rng.random_range(0..=WIDTH);
        let ty = HEIGHT - rng.random_range(280..=380);
        draw_tree(
            &mut c,
            rng,
            IVec2::new(tx, ty),
            0.4,
            hill,
            rgb(60, 40, 20),
            TreeStyle::Normal,
        );
    }
    c.into_image()
}

/// Brahmaputra band: one wavy column every 4 px with shimmering colour
fn draw_river(canvas: &mut Canvas, perlin: &Perlin, y: i32, height: i32, water: Color) {
    for x in (0..WIDTH).step_by(4) {
        let wave = (5.0 * (x as f32 * 0.05).sin()) as i32;
        let shimmer = |axis: f64| (perlin.get([x as f64 * 0.037, axis]) * 10.0) as i32;
        let color = offset(water, shimmer(7.3), shimmer(11.7), shimmer(17.1));
        canvas.vspan(x, y + wave, y + height + wave, color);
    }
}

/// Layer 2: ground, houses, trees and the village path
pub fn midground_layer(act: Act, rng: &mut StdRng) -> RgbaImage {
    let scene = act.palette();
    let mut c = blank_layer();

    c.rect(Rect::new(0, HEIGHT - 200, WIDTH, HEIGHT), Style::fill(scene.ground));

    match act {
        Act::Act1 | Act::Act2 => {
            // Tejimola's home and the neighbour's
            draw_stilt_house(&mut c, 600, HEIGHT - 380, 300, 150, scene);
            draw_stilt_house(&mut c, 1200, HEIGHT - 340, 200, 120, scene);
        }
        Act::Act3 => {
            draw_stilt_house(&mut c, 600, HEIGHT - 370, 300, 150, scene);
            // Overgrown vines
            for _ in 0..10 {
                let vx = 600 + rng.random_range(0..=300);
                let vy = HEIGHT - 370 + rng.random_range(0..=150);
                let end = IVec2::new(
                    vx + rng.random_range(-20..=20),
                    vy + rng.random_range(10..=30),
                );
                c.line(IVec2::new(vx, vy), end, scene.foliage, 2);
            }
        }
        Act::Act4 => {
            draw_stilt_house(&mut c, 600, HEIGHT - 300, 300, 150, scene);
            // Inverted house hanging from the sky
            let top = 100;
            c.rect(
                Rect::new(650, top, 850, top + 120),
                Style::outlined(scene.building_light, BLACK, 2),
            );
            c.polygon(
                &[
                    IVec2::new(640, top + 120),
                    IVec2::new(860, top + 120),
                    IVec2::new(750, top + 180),
                ],
                Style::outlined(scene.building, BLACK, 1),
            );
        }
        Act::Epilogue => {}
    }

    for i in 0..5 {
        let tx = rng.random_range(50..=WIDTH - 100);
        let ty = HEIGHT - rng.random_range(200..=280);
        let style = match i {
            2 => TreeStyle::Nahor,
            4 => TreeStyle::Bamboo,
            _ => TreeStyle::Normal,
        };
        draw_tree(
            &mut c,
            rng,
            IVec2::new(tx, ty),
            0.7,
            scene.foliage,
            scene.building,
            style,
        );
    }

    let path = offset(scene.ground, 30, 20, 10);
    for x in (0..WIDTH).step_by(3) {
        let py = HEIGHT - 180 + (5.0 * (x as f32 * 0.01).sin()) as i32;
        c.vspan(x, py, py + 15, path);
    }
    c.into_image()
}

const FLOWER_COLORS: [Color; 4] = [
    rgb(255, 255, 255),
    rgb(255, 200, 50),
    rgb(255, 150, 150),
    rgb(200, 150, 255),
];

/// Layer 1: grass, flowers or fireflies, border and side leaves
pub fn foreground_layer(act: Act, rng: &mut StdRng) -> RgbaImage {
    let scene = act.palette();
    let mut c = blank_layer();

    for _ in 0..20 {
        let fx = rng.random_range(-50..=WIDTH + 50);
        let fy = HEIGHT - rng.random_range(0..=100);
        for _ in 0..5 {
            let gx = fx + rng.random_range(-15..=15);
            let gh = rng.random_range(20..=50);
            let tip = IVec2::new(gx + rng.random_range(-8..=8), fy - gh);
            c.line(IVec2::new(gx, fy), tip, scene.foliage_light, 2);
        }
    }

    if act.is_bright() {
        for _ in 0..12 {
            let fx = rng.random_range(0..=WIDTH);
            let fy = HEIGHT - rng.random_range(20..=80);
            let petal = FLOWER_COLORS[rng.random_range(0..FLOWER_COLORS.len())];
            let centre = IVec2::new(fx, fy);
            for p in 0..5 {
                c.dot(polar(centre, 5.0, (p * 72) as f32), 3, petal);
            }
            c.dot(centre, 2, palette::GOLD);
        }
    }

    if act.is_night() {
        for _ in 0..20 {
            let px = rng.random_range(0..=WIDTH);
            let py = rng.random_range(100..=HEIGHT - 100);
            let size = rng.random_range(1..=3);
            let alpha = rng.random_range(80..=200u8);
            c.dot(IVec2::new(px, py), size, rgba(200, 200, 255, alpha));
        }
    }

    // Puthi border along the bottom edge
    let border_y = HEIGHT - 10;
    for x in (0..WIDTH).step_by(16) {
        c.dot(IVec2::new(x, border_y), 3, scene.gold_accent);
        c.line(
            IVec2::new(x, border_y - 5),
            IVec2::new(x + 8, border_y - 5),
            scene.gold_accent,
            1,
        );
    }

    // Leaves overlapping the frame edges
    for (side, dir) in [(0, 1), (WIDTH - 80, -1)] {
        for _ in 0..3 {
            let ly = rng.random_range(200..=HEIGHT - 200);
            let leaf = [
                IVec2::new(side, ly),
                IVec2::new(side + 40 * dir, ly - 15),
                IVec2::new(side + 60 * dir, ly),
                IVec2::new(side + 40 * dir, ly + 15),
            ];
            c.polygon(&leaf, Style::outlined(scene.foliage, rgba(0, 0, 0, 100), 1));
        }
    }
    c.into_image()
}

/// Opaque black base with the layers alpha-composited far to near
pub fn composite(layers: &ActLayers) -> RgbaImage {
    let mut c = Canvas::filled(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BLACK);
    for (_, layer) in layers.named() {
        c.overlay(layer);
    }
    c.into_image()
}

/// Render all four layers of `act` from a seed
pub fn render_act(act: Act, seed: u64) -> ActLayers {
    let mut rng = StdRng::seed_from_u64(seed);
    ActLayers {
        sky: sky_layer(act, &mut rng),
        background: background_layer(act, &mut rng),
        midground: midground_layer(act, &mut rng),
        foreground: foreground_layer(act, &mut rng),
    }
}

/// Write the layers and preview composite for one act
pub fn generate_act(act: Act, config: &GeneratorConfig) -> anyhow::Result<()> {
    let dir = config.layout().background_dir(act.dir_name());
    let layers = render_act(act, config.seed_for(act.name()));

    for (name, img) in layers.named() {
        save_png(img, &dir, name)?;
    }
    save_png(&composite(&layers), &dir, "preview_composite")?;
    Ok(())
}

pub fn generate_all(config: &GeneratorConfig) -> anyhow::Result<()> {
    info!("--- BACKGROUNDS ---");
    for act in Act::ALL {
        info!("  {}", act.name());
        generate_act(act, config)?;
    }
    Ok(())
}
