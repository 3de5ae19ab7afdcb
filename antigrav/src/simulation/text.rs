//! Text shape: draw a string into an offscreen bitmap and turn its lit
//! pixels into particle targets on the z = 0 plane.

use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::Rng;

use crate::configuration::config::TextConfig;
use crate::simulation::states::{FVec2, FVec3};

pub const GLYPH_COLS: u32 = 5;
pub const GLYPH_ROWS: u32 = 7;

/// Source of glyph bitmaps
/// A glyph is `GLYPH_ROWS` rows, top first; bit 4 of each row is the leftmost column
pub trait GlyphSet {
    fn glyph(&self, c: char) -> Option<[u8; 7]>;
}

/// Built-in 5x7 block font: A-Z, 0-9, space and a few punctuation marks.
/// Lowercase letters map to uppercase.
pub struct BlockFont;

impl GlyphSet for BlockFont {
    fn glyph(&self, c: char) -> Option<[u8; 7]> {
        let rows = match c.to_ascii_uppercase() {
            'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
            'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
            'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
            'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
            'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
            'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
            'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
            'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
            'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
            'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
            'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
            'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
            'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
            'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
            'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
            'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
            'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
            'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
            'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
            'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
            'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
            'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
            'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
            'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
            'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
            'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
            '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
            '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
            '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
            '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
            '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
            '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
            '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
            '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
            '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
            '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
            ' ' => [0; 7],
            '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
            '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
            '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
            _ => return None,
        };
        Some(rows)
    }
}

/// Glyph set with no glyphs, every string rasterizes to a black bitmap
pub struct NoGlyphs;

impl GlyphSet for NoGlyphs {
    fn glyph(&self, _c: char) -> Option<[u8; 7]> {
        None
    }
}

/// Offscreen bitmap settings for one string
#[derive(Debug, Clone)]
pub struct TextRaster {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub font_px: u32,
    pub threshold: u8,
    pub scale: f32,
}

impl TextRaster {
    pub fn from_config(cfg: &TextConfig) -> Self {
        Self {
            text: cfg.text.clone(),
            width: cfg.canvas_width,
            height: cfg.canvas_height,
            font_px: cfg.font_px,
            threshold: cfg.threshold,
            scale: cfg.scale,
        }
    }

    /// Side of one glyph cell in pixels; caps are ~0.7 of the font size
    fn dot(&self) -> u32 {
        ((self.font_px as f32 * 0.7 / GLYPH_ROWS as f32).round() as u32).max(1)
    }

    /// Draw the string white-on-black, centered on both axes
    pub fn render(&self, glyphs: &dyn GlyphSet) -> GrayImage {
        let mut img = GrayImage::new(self.width, self.height);
        let dot = self.dot() as i64;
        let advance = (GLYPH_COLS as i64 + 1) * dot;
        let chars = self.text.chars().count() as i64;
        if chars == 0 {
            return img;
        }

        // Trailing one-dot gap of the last glyph is not part of the text box
        let text_w = chars * advance - dot;
        let text_h = GLYPH_ROWS as i64 * dot;
        let origin_x = (self.width as i64 - text_w) / 2;
        let origin_y = (self.height as i64 - text_h) / 2;

        for (k, c) in self.text.chars().enumerate() {
            let Some(rows) = glyphs.glyph(c) else {
                continue;
            };
            let pen_x = origin_x + k as i64 * advance;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                        continue;
                    }
                    let x0 = pen_x + col as i64 * dot;
                    let y0 = origin_y + row as i64 * dot;
                    self.fill(&mut img, x0, y0, dot);
                }
            }
        }
        img
    }

    // Fill a dot x dot square, clipped to the canvas
    fn fill(&self, img: &mut GrayImage, x0: i64, y0: i64, dot: i64) {
        let x_lo = x0.max(0);
        let y_lo = y0.max(0);
        let x_hi = (x0 + dot).min(self.width as i64);
        let y_hi = (y0 + dot).min(self.height as i64);
        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                img.put_pixel(x as u32, y as u32, Luma([255]));
            }
        }
    }

    /// World-space coordinates of every pixel brighter than the threshold,
    /// centered on the canvas, y up
    pub fn bright_points(&self, glyphs: &dyn GlyphSet) -> Vec<FVec2> {
        let img = self.render(glyphs);
        let half_w = self.width as f32 * 0.5;
        let half_h = self.height as f32 * 0.5;
        img.enumerate_pixels()
            .filter(|(_, _, px)| px[0] > self.threshold)
            .map(|(x, y, _)| {
                FVec2::new(
                    (x as f32 - half_w) * self.scale,
                    -(y as f32 - half_h) * self.scale,
                )
            })
            .collect()
    }
}

/// Sample `n` targets uniformly (with replacement) from `points`, flat on z = 0.
/// An empty point set puts every target at the origin.
pub fn text_targets(points: &[FVec2], n: usize, rng: &mut StdRng) -> Vec<FVec3> {
    if points.is_empty() {
        return vec![FVec3::zeros(); n];
    }
    (0..n)
        .map(|_| {
            let p = points[rng.gen_range(0..points.len())];
            FVec3::new(p.x, p.y, 0.0)
        })
        .collect()
}
