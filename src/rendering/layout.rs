//! Canvas geometry computed before anything is drawn

use crate::error::{Error, Result};
use crate::range::Document;
use crate::rendering::TextMetrics;
use crate::RenderConfig;

/// Largest canvas area, 1 GiB of RGBA.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Derived geometry of one render. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Width of the line number column, margin included
    pub gutter_width: f32,
    /// Widest measured source line
    pub max_line_width: f32,
    pub image_width: u32,
    pub image_height: u32,
    /// Vertical advance per source line
    pub line_height: f32,
    /// Absolute number of the last rendered line
    pub last_line: usize,
}

impl LayoutMetrics {
    /// Left edge of the code column.
    pub fn code_x(&self, config: &RenderConfig) -> f32 {
        config.padding + self.gutter_width
    }

    /// Right edge that gutter numbers are aligned against.
    pub fn gutter_right(&self, config: &RenderConfig) -> f32 {
        config.padding + self.gutter_width - config.gutter_inset
    }

    /// Fail with [`Error::Draw`] when the canvas is too large to allocate.
    pub fn check_canvas(&self) -> Result<()> {
        let pixels = self.image_width as u64 * self.image_height as u64;
        if pixels > MAX_CANVAS_PIXELS {
            return Err(Error::Draw(format!(
                "canvas {}x{} exceeds the {} pixel limit",
                self.image_width, self.image_height, MAX_CANVAS_PIXELS
            )));
        }
        Ok(())
    }

    /// Baseline of the first source line.
    pub fn first_baseline(&self, config: &RenderConfig) -> f32 {
        config.padding + config.chrome_offset
    }
}

/// Dry run: measure `document` with the same metrics the draw pass uses.
///
/// - gutter is sized for the widest number that can appear
///   (`start_line + line_count`) plus `gutter_margin`
/// - height reserves chrome padding on top, one line height per line, and
///   bottom padding
/// - width is floored at `min_width`
pub fn compute_layout<M: TextMetrics + ?Sized>(
    document: &Document,
    start_line: usize,
    metrics: &M,
    config: &RenderConfig,
) -> LayoutMetrics {
    let line_count = document.line_count();
    let line_height = metrics.font_size() * config.line_spacing;

    let widest_number = start_line + line_count;
    let gutter_width = metrics.measure(&widest_number.to_string()) + config.gutter_margin;

    let max_line_width = document
        .lines()
        .iter()
        .map(|line| metrics.measure(line))
        .fold(0.0_f32, f32::max);

    let image_height = (line_count as f32 * line_height + config.padding * 3.0) as u32;
    let image_width = ((config.padding + gutter_width + max_line_width + config.padding) as u32)
        .max(config.min_width);

    let layout = LayoutMetrics {
        gutter_width,
        max_line_width,
        image_width,
        image_height,
        line_height,
        last_line: (start_line + line_count).saturating_sub(1),
    };
    log::debug!("layout: {:?}", layout);
    layout
}
