//! Menu, dialogue and HUD chrome.

use glam::IVec2;
use image::RgbaImage;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::output::save_png;
use crate::params::palette::*;
use crate::params::GeneratorConfig;
use crate::raster::{font, lerp_color, Canvas, Color, Rect, Style};

pub const BUTTON_WIDTH: u32 = 300;
pub const BUTTON_HEIGHT: u32 = 60;

/// Pixel scale of button labels (5×7 glyphs become 15×21)
const LABEL_SCALE: u32 = 3;

/// Menu buttons as (file stem, label)
pub const BUTTONS: [(&str, &str); 9] = [
    ("btn_new_game", "NEW GAME"),
    ("btn_continue", "CONTINUE"),
    ("btn_extras", "EXTRAS"),
    ("btn_quit", "QUIT"),
    ("btn_resume", "RESUME"),
    ("btn_save", "SAVE"),
    ("btn_load", "LOAD"),
    ("btn_settings", "SETTINGS"),
    ("btn_back", "BACK"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Normal,
    /// Hover / selected
    Highlight,
    Disabled,
}

impl ButtonStyle {
    /// (background, border, label)
    fn colors(self) -> (Color, Color, Color) {
        match self {
            ButtonStyle::Normal => (PARCHMENT, GOLD, EARTH_BROWN),
            ButtonStyle::Highlight => (GOLD, DARK_GOLD, WARM_BROWN),
            ButtonStyle::Disabled => (rgb(200, 200, 200), rgb(150, 150, 150), rgb(100, 100, 100)),
        }
    }
}

/// Puthi frame: outline, corner discs, and dots every 20 px along each edge
pub fn draw_ornamental_frame(canvas: &mut Canvas, bbox: Rect, color: Color, thickness: u32) {
    canvas.rect(bbox, Style::stroke(color, thickness));

    for (cx, cy) in [
        (bbox.x0, bbox.y0),
        (bbox.x1, bbox.y0),
        (bbox.x0, bbox.y1),
        (bbox.x1, bbox.y1),
    ] {
        canvas.dot(IVec2::new(cx, cy), 6, color);
    }

    for i in (bbox.x0 + 20..bbox.x1 - 10).step_by(20) {
        canvas.ellipse(Rect::new(i - 2, bbox.y0 - 3, i + 2, bbox.y0 + 3), Style::fill(color));
        canvas.ellipse(Rect::new(i - 2, bbox.y1 - 3, i + 2, bbox.y1 + 3), Style::fill(color));
    }
    for i in (bbox.y0 + 20..bbox.y1 - 10).step_by(20) {
        canvas.ellipse(Rect::new(bbox.x0 - 3, i - 2, bbox.x0 + 3, i + 2), Style::fill(color));
        canvas.ellipse(Rect::new(bbox.x1 - 3, i - 2, bbox.x1 + 3, i + 2), Style::fill(color));
    }
}

/// 1920×1080 title screen: dusk gradient under a blossoming nahor tree
pub fn menu_background(rng: &mut StdRng) -> RgbaImage {
    let mut c = Canvas::new(1920, 1080);

    for y in 0..1080 {
        let t = y as f32 / 1080.0;
        let color = rgb(
            (45.0 + 94.0 * t) as u8,
            (30.0 + 39.0 * t) as u8,
            (50.0 - 31.0 * t * 0.5) as u8,
        );
        c.hspan(y, 0, 1920, color);
    }

    let (cx, cy) = (960, 700);
    c.rect(Rect::new(cx - 15, cy - 50, cx + 15, cy + 200), Style::fill(WARM_BROWN));
    c.rect(Rect::new(cx - 10, cy - 50, cx + 10, cy + 200), Style::fill(EARTH_BROWN));

    let branches = [
        (-50, -120, -200),
        (-50, 130, -180),
        (-80, -80, -250),
        (-80, 90, -240),
        (-100, -40, -280),
        (-100, 50, -270),
    ];
    for (root_y, tip_x, tip_y) in branches {
        c.line(
            IVec2::new(cx, cy + root_y),
            IVec2::new(cx + tip_x, cy + tip_y),
            WARM_BROWN,
            6,
        );
    }

    // Canopy, each clump a slightly different green
    for _ in 0..25 {
        let fx = cx + rng.random_range(-180..=180);
        let fy = cy - rng.random_range(150..=320);
        let size = rng.random_range(25..=50);
        let green = offset(
            FOREST_GREEN,
            rng.random_range(-10..=10),
            rng.random_range(-20..=20),
            rng.random_range(-10..=10),
        );
        c.ellipse(
            Rect::new(fx - size, fy - size / 2, fx + size, fy + size / 2),
            Style::fill(green),
        );
    }

    for _ in 0..30 {
        let blossom = IVec2::new(
            cx + rng.random_range(-160..=160),
            cy - rng.random_range(130..=300),
        );
        c.dot(blossom, 4, WHITE);
        c.dot(blossom, 2, GOLD);
    }

    // Falling petals
    for _ in 0..15 {
        let px = rng.random_range(200..=1700);
        let py = rng.random_range(100..=900);
        let size = rng.random_range(2..=5);
        c.ellipse(
            Rect::new(px - size, py - size / 2, px + size, py + size / 2),
            Style::fill(rgba(255, 255, 255, 180)),
        );
    }

    draw_ornamental_frame(&mut c, Rect::new(40, 40, 1880, 1040), GOLD, 3);

    for x in (0..1920).step_by(5) {
        let gy = 900 + rng.random_range(-5..=5);
        let tip = IVec2::new(x + rng.random_range(-3..=3), gy - rng.random_range(5..=15));
        c.line(IVec2::new(x, gy), tip, FOREST_GREEN, 2);
    }
    c.into_image()
}

/// 300×60 rounded button with a centred label
pub fn button(label: &str, style: ButtonStyle) -> RgbaImage {
    let (w, h) = (BUTTON_WIDTH as i32, BUTTON_HEIGHT as i32);
    let (bg, border, ink) = style.colors();
    let mut c = Canvas::new(BUTTON_WIDTH, BUTTON_HEIGHT);

    c.rounded_rect(Rect::new(2, 2, w - 3, h - 3), 8, Style::outlined(bg, border, 3));

    c.ellipse(Rect::new(8, h / 2 - 4, 16, h / 2 + 4), Style::fill(border));
    c.ellipse(Rect::new(w - 16, h / 2 - 4, w - 8, h / 2 + 4), Style::fill(border));

    let (tw, th) = font::text_size(label, LABEL_SCALE);
    let tx = (w - tw as i32) / 2;
    let ty = (h - th as i32) / 2 - 2;
    c.text(IVec2::new(tx, ty), label, ink, LABEL_SCALE);
    c.into_image()
}

/// 1200×250 translucent dialogue panel with portrait frame and name plate
pub fn dialogue_box() -> RgbaImage {
    let (w, h) = (1200, 250);
    let mut c = Canvas::new(w as u32, h as u32);

    c.rounded_rect(
        Rect::new(0, 0, w - 1, h - 1),
        12,
        Style::outlined(rgba(40, 30, 20, 200), GOLD, 3),
    );
    c.rounded_rect(Rect::new(8, 8, w - 9, h - 9), 8, Style::stroke(with_alpha(GOLD, 120), 1));
    // Portrait frame
    c.rounded_rect(Rect::new(15, 15, 175, h - 15), 6, Style::stroke(GOLD, 2));
    // Name plate
    c.rounded_rect(
        Rect::new(190, 15, 500, 50),
        4,
        Style::outlined(rgba(60, 40, 20, 180), DARK_GOLD, 2),
    );

    for (cx, cy) in [(5, 5), (w - 6, 5), (5, h - 6), (w - 6, h - 6)] {
        c.dot(IVec2::new(cx, cy), 8, GOLD);
    }
    c.into_image()
}

/// 64×64 spirit pulse icon: three fading rings around a solid core
pub fn spirit_pulse_icon() -> RgbaImage {
    let mut c = Canvas::new(64, 64);
    let center = IVec2::new(32, 32);
    for i in 0..3 {
        let r = 12 + i * 8;
        let alpha = (255 - i * 60) as u8;
        c.ellipse(
            Rect::around(center, r, r),
            Style::stroke(with_alpha(SPIRIT_PURPLE, alpha), 2),
        );
    }
    c.dot(center, 4, SPIRIT_PURPLE);
    c.into_image()
}

/// 300×30 exhaustion bar frame
pub fn bar_background() -> RgbaImage {
    let mut c = Canvas::new(300, 30);
    c.rounded_rect(
        Rect::new(0, 0, 299, 29),
        4,
        Style::outlined(rgba(20, 20, 20, 180), GOLD, 2),
    );
    c.into_image()
}

/// 292×22 bar fill, red at empty to green at full
pub fn bar_fill() -> RgbaImage {
    let (w, h) = (292u32, 22u32);
    let mut c = Canvas::new(w, h);
    for x in 0..w as i32 {
        let t = x as f32 / w as f32;
        c.vspan(x, 0, h as i32 - 1, lerp_color(TRIUMPH_RED, FOREST_GREEN, t));
    }
    c.into_image()
}

/// 32×32 watcher eye; red and pupilled while the player is being watched
pub fn catch_icon(active: bool) -> RgbaImage {
    let mut c = Canvas::new(32, 32);
    let eye = Rect::around(IVec2::new(16, 16), 10, 6);
    if active {
        c.ellipse(eye, Style::outlined(MEKHELA_RED, BLACK, 2));
        c.dot(IVec2::new(16, 16), 3, BLACK);
    } else {
        c.ellipse(eye, Style::outlined(rgb(100, 100, 100), rgb(60, 60, 60), 2));
    }
    c.into_image()
}

pub fn generate_all(config: &GeneratorConfig) -> anyhow::Result<()> {
    let layout = config.layout();
    let mut rng = StdRng::seed_from_u64(config.seed_for("ui"));

    info!("--- MENU UI ---");
    let menu = layout.menu_dir();
    save_png(&menu_background(&mut rng), &menu, "menu_background")?;
    for (name, label) in BUTTONS {
        save_png(&button(label, ButtonStyle::Normal), &menu, name)?;
        save_png(
            &button(label, ButtonStyle::Highlight),
            &menu,
            &format!("{name}_highlight"),
        )?;
    }

    info!("--- DIALOGUE BOX ---");
    save_png(&dialogue_box(), &layout.dialogue_dir(), "dialogue_box")?;

    info!("--- HUD ---");
    let hud = layout.hud_dir();
    save_png(&spirit_pulse_icon(), &hud, "spirit_pulse_icon")?;
    save_png(&bar_background(), &hud, "bar_background")?;
    save_png(&bar_fill(), &hud, "bar_fill")?;
    save_png(&catch_icon(true), &hud, "catch_icon_active")?;
    save_png(&catch_icon(false), &hud, "catch_icon_inactive")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_styles() {
        let normal = button("QUIT", ButtonStyle::Normal);
        let hover = button("QUIT", ButtonStyle::Highlight);
        let disabled = button("QUIT", ButtonStyle::Disabled);

        assert_eq!(normal.dimensions(), (300, 60));
        // Border row at the top middle
        assert_eq!(*normal.get_pixel(150, 3), GOLD);
        assert_eq!(*hover.get_pixel(150, 3), DARK_GOLD);
        assert_eq!(*disabled.get_pixel(150, 3), rgb(150, 150, 150));
        // Transparent outside the rounded rect
        assert_eq!(normal.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_button_label_is_centred() {
        let img = button("NEW GAME", ButtonStyle::Normal);
        let ink: Vec<u32> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == EARTH_BROWN)
            .map(|(x, _, _)| x)
            .collect();

        let (min, max) = (ink.iter().min().copied(), ink.iter().max().copied());
        let (min, max) = (min.unwrap_or(0), max.unwrap_or(0));
        assert!(min > 50 && max < 250);
        assert!((min as i32 + max as i32 - 300).abs() <= 4);
    }

    #[test]
    fn test_every_button_label_fits() {
        for (_, label) in BUTTONS {
            let (w, h) = font::text_size(label, LABEL_SCALE);
            assert!(w < BUTTON_WIDTH - 40, "{label}");
            assert!(h < BUTTON_HEIGHT);
        }
    }

    #[test]
    fn test_dialogue_box_translucent_body() {
        let img = dialogue_box();

        assert_eq!(img.dimensions(), (1200, 250));
        assert_eq!(*img.get_pixel(600, 150), rgba(40, 30, 20, 200));
        assert_eq!(*img.get_pixel(600, 1), GOLD);
    }

    #[test]
    fn test_bar_fill_gradient_ends() {
        let img = bar_fill();

        assert_eq!(img.dimensions(), (292, 22));
        assert_eq!(*img.get_pixel(0, 10), TRIUMPH_RED);
        let end = img.get_pixel(291, 21).0;
        assert!(end[1] > 130 && end[0] < 40);
    }

    #[test]
    fn test_catch_icons_differ() {
        assert_eq!(*catch_icon(true).get_pixel(16, 16), BLACK);
        assert_eq!(*catch_icon(false).get_pixel(16, 16), rgb(100, 100, 100));
    }

    #[test]
    fn test_spirit_icon_rings_fade() {
        let img = spirit_pulse_icon();

        assert_eq!(img.get_pixel(32 + 12, 32).0[3], 255);
        assert_eq!(img.get_pixel(32 + 28, 32).0[3], 135);
        assert_eq!(*img.get_pixel(32, 32), SPIRIT_PURPLE);
    }

    #[test]
    fn test_ornamental_frame_corners() {
        let mut c = Canvas::new(100, 100);
        draw_ornamental_frame(&mut c, Rect::new(10, 10, 90, 90), GOLD, 3);

        assert_eq!(c.pixel(10, 10), Some(GOLD));
        assert_eq!(c.pixel(14, 14), Some(GOLD));
        assert_eq!(c.pixel(50, 50), Some(TRANSPARENT));
        // Edge dot sticks out past the outline
        assert_eq!(c.pixel(30, 8), Some(GOLD));
    }
}
