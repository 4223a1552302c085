//! Pixel-backed surface and PNG encoding

use std::io::Cursor;

use ab_glyph::Font;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::Result;
use crate::font::FontFace;
use crate::rendering::{Screenshot, Surface};
use crate::theme::Color;

/// An RGBA canvas that draws text with a [`FontFace`].
pub struct RasterSurface<'a> {
    image: RgbaImage,
    face: &'a FontFace,
}

impl<'a> RasterSurface<'a> {
    pub fn new(width: u32, height: u32, face: &'a FontFace) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            face,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode the canvas as PNG.
    pub fn encode_png(&self) -> Result<Screenshot> {
        let mut png_data = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;
        Ok(Screenshot {
            width: self.image.width(),
            height: self.image.height(),
            png_data,
        })
    }

    /// Blend `color` over the pixel at `(x, y)` with the given coverage.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let src = color.to_rgba();
        for channel in 0..3 {
            let dst = pixel.0[channel] as f32;
            pixel.0[channel] = (dst + (src[channel] as f32 - dst) * coverage).round() as u8;
        }
        pixel.0[3] = 255;
    }
}

impl Surface for RasterSurface<'_> {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self, color: Color) {
        let fill = Rgba(color.to_rgba());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let min_x = (cx - radius - 1.0).floor() as i64;
        let max_x = (cx + radius + 1.0).ceil() as i64;
        let min_y = (cy - radius - 1.0).floor() as i64;
        let max_y = (cy + radius + 1.0).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                // one pixel of linear falloff at the edge
                let coverage = radius + 0.5 - (dx * dx + dy * dy).sqrt();
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, color: Color) {
        let face = self.face;
        for glyph in face.layout_glyphs(text, x, baseline) {
            let Some(outlined) = face.font().outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                self.blend(px, py, color, coverage);
            });
        }
    }
}
