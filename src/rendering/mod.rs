//! Rendering pipeline: measure, paint, rasterize
//!
//! [`layout`] computes the canvas geometry in a dry run, [`paint`] walks the
//! token stream and issues drawing calls against a [`Surface`], and
//! [`raster`] provides the pixel-backed surface and PNG encoding.

pub mod layout;
pub mod paint;
pub mod raster;

use sha2::{Digest, Sha256};

use crate::theme::Color;

/// String measurement shared by the layout dry run and the draw pass.
pub trait TextMetrics {
    /// Advance width of `text` on a single line.
    fn measure(&self, text: &str) -> f32;

    /// Pixels per em.
    fn font_size(&self) -> f32;
}

/// A 2D drawing target.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Draw `text` with its baseline starting at `(x, baseline)`.
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, color: Color);
}

/// An encoded image.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// Hex SHA-256 of the PNG bytes.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}
