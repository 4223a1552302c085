//! The bundled monospace font and its on-disk staging
//!
//! The face is loaded from a filesystem path, so the embedded bytes are
//! first written to a temporary file that lives exactly as long as the
//! [`StagedFont`] guard.

use std::io::Write;
use std::path::Path;

use ab_glyph::{point, Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::rendering::TextMetrics;

/// DejaVu Sans Mono, see `assets/fonts/LICENSE-DejaVu.txt`.
pub static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// A temporary copy of font bytes on disk, removed on drop.
#[derive(Debug)]
pub struct StagedFont {
    file: NamedTempFile,
}

impl StagedFont {
    pub fn stage(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Draw("embedded font is empty".into()));
        }

        let mut file = tempfile::Builder::new()
            .prefix("code-font-")
            .suffix(".ttf")
            .tempfile()
            .map_err(|e| Error::Draw(format!("failed to create temporary font file: {}", e)))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| Error::Draw(format!("failed to write temporary font file: {}", e)))?;

        log::debug!("staged font ({} bytes) at {}", bytes.len(), file.path().display());
        Ok(Self { file })
    }

    /// Stage the bundled font.
    pub fn embedded() -> Result<Self> {
        Self::stage(EMBEDDED_FONT)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// A font at a fixed pixel size. `size` is pixels per em, so a 24 unit
/// font has 24 pixel em boxes.
#[derive(Clone, Debug)]
pub struct FontFace {
    font: FontArc,
    size: f32,
    scale: PxScale,
}

impl FontFace {
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| Error::Draw(format!("failed to read font {}: {}", path.display(), e)))?;
        Self::from_bytes(data, size)
    }

    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| Error::Draw(format!("invalid font: {}", e)))?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| Error::Draw("font has no units-per-em".into()))?;
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
        Ok(Self { font, size, scale })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// Lay `text` out on a baseline starting at `(x, baseline)`.
    ///
    /// The caret advances exactly as in [`FontFace::measure`], so the last
    /// glyph ends at `x + measure(text)`.
    pub fn layout_glyphs(&self, text: &str, x: f32, baseline: f32) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        glyphs
    }
}

impl TextMetrics for FontFace {
    fn measure(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    fn font_size(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_font_is_removed_on_drop() {
        let staged = StagedFont::embedded().unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap().len(), EMBEDDED_FONT.len());
        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn empty_font_bytes_are_a_draw_error() {
        assert!(matches!(StagedFont::stage(&[]), Err(Error::Draw(_))));
        assert!(matches!(FontFace::from_bytes(vec![0; 16], 24.0), Err(Error::Draw(_))));
    }

    #[test]
    fn monospace_widths_scale_with_length() {
        let staged = StagedFont::embedded().unwrap();
        let face = FontFace::load(staged.path(), 24.0).unwrap();
        let one = face.measure("m");
        assert!(one > 10.0 && one < 24.0, "unexpected advance {}", one);
        assert!((face.measure("mmmm") - 4.0 * one).abs() < 0.01);
        assert!((face.measure("iiii") - face.measure("MMMM")).abs() < 0.01);
        assert_eq!(face.measure(""), 0.0);
    }

    #[test]
    fn glyph_layout_agrees_with_measure() {
        let face = FontFace::from_bytes(EMBEDDED_FONT.to_vec(), 24.0).unwrap();
        let glyphs = face.layout_glyphs("fn main", 10.0, 50.0);
        assert_eq!(glyphs.len(), 7);
        assert_eq!(glyphs[0].position, point(10.0, 50.0));
        let last = glyphs.last().unwrap();
        let advance = face.font().as_scaled(face.scale).h_advance(last.id);
        assert!((last.position.x + advance - (10.0 + face.measure("fn main"))).abs() < 0.01);
    }
}
