//! Software rasterizer for sprite and background composition.
//!
//! A [`Canvas`] wraps an `RgbaImage` and draws flat-shaded primitives onto it.
//! Primitive drawing *replaces* destination pixels with the ink colour,
//! alpha included, so a translucent fill leaves a translucent pixel behind.
//! Blending only happens in [`Canvas::overlay`].
//!
//! Integer coordinates address pixel centres. Bounding boxes are inclusive
//! on both ends and everything outside the canvas is clipped.

pub mod font;

use glam::{IVec2, Vec2};
use image::{imageops, Rgba, RgbaImage};

pub type Color = Rgba<u8>;

/// Inclusive pixel bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Build a box from two corners in any order
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Box spanning `center ± (rx, ry)`
    pub fn around(center: IVec2, rx: i32, ry: i32) -> Self {
        Self::new(center.x - rx, center.y - ry, center.x + rx, center.y + ry)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x0 + self.x1) as f32 / 2.0,
            (self.y0 + self.y1) as f32 / 2.0,
        )
    }
}

/// Fill and outline for a closed shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    /// Outline width in pixels, drawn inside the shape's bounds
    pub width: u32,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            outline: None,
            width: 1,
        }
    }

    pub fn stroke(color: Color, width: u32) -> Self {
        Self {
            fill: None,
            outline: Some(color),
            width,
        }
    }

    pub fn outlined(fill: Color, outline: Color, width: u32) -> Self {
        Self {
            fill: Some(fill),
            outline: Some(outline),
            width,
        }
    }
}

/// Point at `radius` along `degrees` (clockwise from 3 o'clock), truncated
/// towards zero per axis
pub fn polar(center: IVec2, radius: f32, degrees: f32) -> IVec2 {
    let rad = degrees.to_radians();
    IVec2::new(
        center.x + (radius * rad.cos()) as i32,
        center.y + (radius * rad.sin()) as i32,
    )
}

/// RGBA drawing surface
#[derive(Clone, Debug)]
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width, height),
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            img: RgbaImage::from_pixel(width, height, color),
        }
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            Some(*self.img.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height()
    }

    /// Set one pixel (clipped)
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if self.contains(x, y) {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Horizontal run `x0..=x1` on row `y` (clipped)
    pub fn hspan(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y as u32 >= self.img.height() {
            return;
        }
        let lo = x0.max(0);
        let hi = x1.min(self.img.width() as i32 - 1);
        for x in lo..=hi {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Vertical run `y0..=y1` on column `x` (clipped)
    pub fn vspan(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.put(x, y, color);
        }
    }

    /// Axis-aligned rectangle
    pub fn rect(&mut self, bbox: Rect, style: Style) {
        if let Some(fill) = style.fill {
            for y in bbox.y0..=bbox.y1 {
                self.hspan(y, bbox.x0, bbox.x1, fill);
            }
        }
        if let Some(outline) = style.outline {
            let w = style.width.max(1) as i32;
            for y in bbox.y0..=bbox.y1 {
                if y < bbox.y0 + w || y > bbox.y1 - w {
                    self.hspan(y, bbox.x0, bbox.x1, outline);
                } else {
                    self.hspan(y, bbox.x0, bbox.x0 + w - 1, outline);
                    self.hspan(y, bbox.x1 - w + 1, bbox.x1, outline);
                }
            }
        }
    }

    /// Rectangle with circular corners of `radius`
    pub fn rounded_rect(&mut self, bbox: Rect, radius: i32, style: Style) {
        let w = style.width.max(1) as i32;
        let inner = Rect {
            x0: bbox.x0 + w,
            y0: bbox.y0 + w,
            x1: bbox.x1 - w,
            y1: bbox.y1 - w,
        };
        let inner_radius = (radius - w).max(0);

        for y in bbox.y0..=bbox.y1 {
            for x in bbox.x0..=bbox.x1 {
                if !inside_rounded(x, y, bbox, radius) {
                    continue;
                }
                let in_border = inner.x0 > inner.x1
                    || inner.y0 > inner.y1
                    || !inside_rounded(x, y, inner, inner_radius);
                match (style.outline, style.fill) {
                    (Some(outline), _) if in_border => self.put(x, y, outline),
                    (_, Some(fill)) => self.put(x, y, fill),
                    _ => {}
                }
            }
        }
    }

    /// Ellipse inscribed in `bbox`
    pub fn ellipse(&mut self, bbox: Rect, style: Style) {
        let c = bbox.center();
        let a = (bbox.x1 - bbox.x0) as f32 / 2.0 + 0.5;
        let b = (bbox.y1 - bbox.y0) as f32 / 2.0 + 0.5;
        let w = style.width.max(1) as f32;

        for y in bbox.y0..=bbox.y1 {
            let Some((l, r)) = ellipse_span(c, a, b, y) else {
                continue;
            };
            if let Some(fill) = style.fill {
                self.hspan(y, l, r, fill);
            }
            if let Some(outline) = style.outline {
                match ellipse_span(c, a - w, b - w, y) {
                    Some((il, ir)) if a > w && b > w => {
                        self.hspan(y, l, il - 1, outline);
                        self.hspan(y, ir + 1, r, outline);
                    }
                    _ => self.hspan(y, l, r, outline),
                }
            }
        }
    }

    /// Filled disc of radius `r` around `center` (shorthand for the many
    /// ornamental dots)
    pub fn dot(&mut self, center: IVec2, r: i32, color: Color) {
        self.ellipse(Rect::around(center, r, r), Style::fill(color));
    }

    /// Closed polygon. Edges are part of the fill; the outline, when given,
    /// is traced on top with `style.width`.
    pub fn polygon(&mut self, points: &[IVec2], style: Style) {
        if points.len() < 2 {
            return;
        }
        if let Some(fill) = style.fill {
            let pts: Vec<Vec2> = points.iter().map(|p| p.as_vec2()).collect();
            self.fill_polygon(&pts, fill);
            self.trace(points, fill, 1);
        }
        if let Some(outline) = style.outline {
            self.trace(points, outline, style.width);
        }
    }

    fn trace(&mut self, points: &[IVec2], color: Color, width: u32) {
        for (i, &p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            self.line(p, q, color, width);
        }
    }

    /// Even-odd scanline fill sampled at pixel centres
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let y_start = (min_y.ceil() as i32).max(0);
        let y_end = (max_y.floor() as i32).min(self.img.height() as i32 - 1);

        let mut xs = Vec::new();
        for y in y_start..=y_end {
            let yc = y as f32;
            xs.clear();
            for (i, &p) in points.iter().enumerate() {
                let q = points[(i + 1) % points.len()];
                if p.y == q.y {
                    continue;
                }
                let (lo, hi) = if p.y < q.y { (p, q) } else { (q, p) };
                if yc >= lo.y && yc < hi.y {
                    xs.push(lo.x + (yc - lo.y) * (hi.x - lo.x) / (hi.y - lo.y));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                self.hspan(y, pair[0].ceil() as i32, pair[1].floor() as i32, color);
            }
        }
    }

    /// Straight stroke from `a` to `b`
    pub fn line(&mut self, a: IVec2, b: IVec2, color: Color, width: u32) {
        if width <= 1 {
            self.bresenham(a, b, color);
            return;
        }

        let half = width as f32 / 2.0;
        let dir = (b - a).as_vec2();
        if dir.length_squared() == 0.0 {
            let r = (width / 2) as i32;
            self.rect(Rect::around(a, r, r), Style::fill(color));
            return;
        }
        let n = dir.perp().normalize() * half;
        let (af, bf) = (a.as_vec2(), b.as_vec2());
        self.fill_polygon(&[af + n, bf + n, bf - n, af - n], color);
        // Hairline keeps very thin diagonal strokes connected
        self.bresenham(a, b, color);
    }

    fn bresenham(&mut self, a: IVec2, b: IVec2, color: Color) {
        let (mut x, mut y) = (a.x, a.y);
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Elliptical arc of the ellipse inscribed in `bbox`, from `start` to
    /// `end` degrees clockwise from 3 o'clock. `end < start` wraps through
    /// 360.
    pub fn arc(&mut self, bbox: Rect, start: f32, end: f32, color: Color, width: u32) {
        let c = bbox.center();
        let a = (bbox.x1 - bbox.x0) as f32 / 2.0 + 0.5;
        let b = (bbox.y1 - bbox.y0) as f32 / 2.0 + 0.5;
        let w = width.max(1) as f32;
        let (ia, ib) = (a - w, b - w);

        let start = start.rem_euclid(360.0);
        let mut span = (end.rem_euclid(360.0) - start).rem_euclid(360.0);
        if span == 0.0 && end != start {
            span = 360.0;
        }

        for y in bbox.y0..=bbox.y1 {
            for x in bbox.x0..=bbox.x1 {
                let dx = x as f32 - c.x;
                let dy = y as f32 - c.y;
                if (dx / a).powi(2) + (dy / b).powi(2) > 1.0 {
                    continue;
                }
                if ia > 0.0 && ib > 0.0 && (dx / ia).powi(2) + (dy / ib).powi(2) < 1.0 {
                    continue;
                }
                let angle = (dy / b).atan2(dx / a).to_degrees().rem_euclid(360.0);
                if (angle - start).rem_euclid(360.0) <= span {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Top-to-bottom linear gradient over the whole canvas
    pub fn vertical_gradient(&mut self, top: Color, bottom: Color) {
        let h = self.img.height().max(1) as f32;
        let right = self.img.width() as i32 - 1;
        for y in 0..self.img.height() as i32 {
            let color = lerp_color(top, bottom, y as f32 / h);
            self.hspan(y, 0, right, color);
        }
    }

    /// Bitmap text with its top-left corner at `origin`
    pub fn text(&mut self, origin: IVec2, text: &str, color: Color, scale: u32) {
        let s = scale.max(1) as i32;
        let mut pen = origin.x;
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..font::GLYPH_WIDTH as i32 {
                        if bits & (1 << (font::GLYPH_WIDTH as i32 - 1 - col)) != 0 {
                            let x = pen + col * s;
                            let y = origin.y + row as i32 * s;
                            self.rect(Rect::new(x, y, x + s - 1, y + s - 1), Style::fill(color));
                        }
                    }
                }
            }
            pen += font::ADVANCE as i32 * s;
        }
    }

    /// Rewrite every pixel that is not fully transparent
    pub fn map_opaque(&mut self, f: impl Fn(Color) -> Color) {
        for pixel in self.img.pixels_mut() {
            if pixel.0[3] > 0 {
                *pixel = f(*pixel);
            }
        }
    }

    /// Copy `src` with its top-left at `(x, y)`, replacing destination pixels
    pub fn paste(&mut self, src: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.img, src, x, y);
    }

    /// Alpha-composite `src` over this canvas
    pub fn overlay(&mut self, src: &RgbaImage) {
        imageops::overlay(&mut self.img, src, 0, 0);
    }

    /// Nearest-neighbour resize (keeps hard pixel edges)
    pub fn resized_nearest(&self, width: u32, height: u32) -> RgbaImage {
        imageops::resize(&self.img, width, height, imageops::FilterType::Nearest)
    }
}

/// Per-channel linear interpolation, truncated
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let mut out = [0u8; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let (ca, cb) = (a.0[i] as f32, b.0[i] as f32);
        *o = (ca + (cb - ca) * t).clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Horizontal extent of an ellipse on row `y`, in whole pixels
fn ellipse_span(c: Vec2, a: f32, b: f32, y: i32) -> Option<(i32, i32)> {
    if a <= 0.0 || b <= 0.0 {
        return None;
    }
    let dy = (y as f32 - c.y) / b;
    if dy.abs() > 1.0 {
        return None;
    }
    let half = a * (1.0 - dy * dy).sqrt();
    let l = (c.x - half).ceil() as i32;
    let r = (c.x + half).floor() as i32;
    (l <= r).then_some((l, r))
}

fn inside_rounded(x: i32, y: i32, bbox: Rect, radius: i32) -> bool {
    if x < bbox.x0 || x > bbox.x1 || y < bbox.y0 || y > bbox.y1 {
        return false;
    }
    let r = radius.min(bbox.width() / 2).min(bbox.height() / 2).max(0);
    let cx = x.clamp(bbox.x0 + r, bbox.x1 - r);
    let cy = y.clamp(bbox.y0 + r, bbox.y1 - r);
    let (dx, dy) = ((x - cx) as f32, (y - cy) as f32);
    dx * dx + dy * dy <= (r as f32 + 0.5).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::palette::{rgb, rgba, BLACK, GOLD, TRANSPARENT, WHITE};

    fn count(canvas: &Canvas, color: Color) -> usize {
        canvas.image().pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_rect_is_inclusive() {
        let mut canvas = Canvas::new(16, 16);
        canvas.rect(Rect::new(2, 2, 5, 5), Style::fill(GOLD));

        assert_eq!(count(&canvas, GOLD), 16);
        assert_eq!(canvas.pixel(5, 5), Some(GOLD));
        assert_eq!(canvas.pixel(6, 5), Some(TRANSPARENT));
    }

    #[test]
    fn test_rect_outline_drawn_inside() {
        let mut canvas = Canvas::new(16, 16);
        canvas.rect(Rect::new(0, 0, 9, 9), Style::outlined(WHITE, BLACK, 2));

        assert_eq!(canvas.pixel(1, 1), Some(BLACK));
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(8, 5), Some(BLACK));
        assert_eq!(count(&canvas, WHITE), 36);
    }

    #[test]
    fn test_drawing_replaces_alpha() {
        let mut canvas = Canvas::filled(8, 8, WHITE);
        let ghost = rgba(10, 20, 30, 40);
        canvas.dot(IVec2::new(4, 4), 2, ghost);

        assert_eq!(canvas.pixel(4, 4), Some(ghost));
    }

    #[test]
    fn test_ellipse_symmetric_and_bounded() {
        let mut canvas = Canvas::new(32, 32);
        canvas.ellipse(Rect::new(4, 8, 24, 20), Style::fill(GOLD));

        assert_eq!(canvas.pixel(14, 14), Some(GOLD));
        assert_eq!(canvas.pixel(4, 14), Some(GOLD));
        assert_eq!(canvas.pixel(24, 14), Some(GOLD));
        assert_eq!(canvas.pixel(4, 8), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(3, 14), Some(TRANSPARENT));
        for y in 0..32 {
            for x in 0..=28 {
                assert_eq!(canvas.pixel(x, y), canvas.pixel(28 - x, y));
            }
        }
    }

    #[test]
    fn test_ellipse_outline_ring() {
        let mut canvas = Canvas::new(40, 40);
        canvas.ellipse(Rect::new(0, 0, 39, 39), Style::outlined(WHITE, BLACK, 3));

        assert_eq!(canvas.pixel(20, 20), Some(WHITE));
        assert_eq!(canvas.pixel(0, 20), Some(BLACK));
        assert_eq!(canvas.pixel(2, 20), Some(BLACK));
        assert_eq!(canvas.pixel(4, 20), Some(WHITE));
    }

    #[test]
    fn test_clipping_never_panics() {
        let mut canvas = Canvas::new(10, 10);
        canvas.ellipse(Rect::new(-50, -50, 50, 50), Style::fill(GOLD));
        canvas.line(IVec2::new(-20, 5), IVec2::new(40, 5), BLACK, 4);
        canvas.polygon(
            &[IVec2::new(-5, -5), IVec2::new(30, 0), IVec2::new(0, 30)],
            Style::fill(WHITE),
        );
        canvas.rounded_rect(Rect::new(-3, -3, 20, 20), 4, Style::fill(GOLD));

        assert_eq!(canvas.width(), 10);
    }

    #[test]
    fn test_polygon_includes_edges() {
        let mut canvas = Canvas::new(16, 16);
        let square = [
            IVec2::new(2, 2),
            IVec2::new(10, 2),
            IVec2::new(10, 10),
            IVec2::new(2, 10),
        ];
        canvas.polygon(&square, Style::fill(GOLD));

        assert_eq!(count(&canvas, GOLD), 81);
    }

    #[test]
    fn test_thick_horizontal_line_is_centred() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line(IVec2::new(2, 10), IVec2::new(17, 10), BLACK, 3);

        assert_eq!(canvas.pixel(8, 9), Some(BLACK));
        assert_eq!(canvas.pixel(8, 10), Some(BLACK));
        assert_eq!(canvas.pixel(8, 11), Some(BLACK));
        assert_eq!(canvas.pixel(8, 8), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(8, 12), Some(TRANSPARENT));
    }

    #[test]
    fn test_arc_lower_half_only() {
        let mut canvas = Canvas::new(21, 21);
        canvas.arc(Rect::new(0, 0, 20, 20), 0.0, 180.0, BLACK, 2);

        assert_eq!(canvas.pixel(10, 20), Some(BLACK));
        assert_eq!(canvas.pixel(10, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(10, 10), Some(TRANSPARENT));
    }

    #[test]
    fn test_arc_wraps_when_end_before_start() {
        let mut canvas = Canvas::new(21, 21);
        canvas.arc(Rect::new(0, 0, 20, 20), 180.0, 0.0, BLACK, 2);

        assert_eq!(canvas.pixel(10, 0), Some(BLACK));
        assert_eq!(canvas.pixel(10, 20), Some(TRANSPARENT));
    }

    #[test]
    fn test_rounded_rect_cuts_corners() {
        let mut canvas = Canvas::new(30, 20);
        canvas.rounded_rect(Rect::new(0, 0, 29, 19), 8, Style::outlined(WHITE, GOLD, 2));

        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(15, 0), Some(GOLD));
        assert_eq!(canvas.pixel(15, 10), Some(WHITE));
    }

    #[test]
    fn test_map_opaque_skips_transparent() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put(0, 0, rgb(10, 10, 10));
        canvas.map_opaque(|_| WHITE);

        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_vertical_gradient_endpoints() {
        let mut canvas = Canvas::new(2, 10);
        canvas.vertical_gradient(rgb(0, 0, 0), rgb(100, 200, 50));

        assert_eq!(canvas.pixel(0, 0), Some(rgb(0, 0, 0)));
        assert_eq!(canvas.pixel(1, 5), Some(rgb(50, 100, 25)));
    }

    #[test]
    fn test_polar_truncates() {
        assert_eq!(polar(IVec2::new(10, 10), 5.0, 0.0), IVec2::new(15, 10));
        assert_eq!(polar(IVec2::new(10, 10), 5.0, 90.0), IVec2::new(10, 15));
        assert_eq!(polar(IVec2::new(0, 0), 12.0, 45.0), IVec2::new(8, 8));
    }
}
