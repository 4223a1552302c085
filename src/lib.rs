//! Code Snippet Renderer
//!
//! Turns a block of source code into a PNG: syntax-colored text in a
//! monospace font, a line-number gutter, and a window frame with
//! traffic-light controls.
//!
//! # Pipeline
//!
//! 1. The input is split into a tab-normalized [`Document`] and optionally
//!    narrowed to a line range ([`range`]).
//! 2. The excerpt is tokenized ([`syntax`]).
//! 3. A dry run computes the canvas size ([`rendering::layout`]).
//! 4. The tokens are drawn onto a canvas of exactly that size
//!    ([`rendering::paint`], [`rendering::raster`]).
//! 5. The PNG goes to the clipboard and/or a file ([`output`]).
//!
//! # Example
//!
//! ```no_run
//! use code_snippet::{render_snippet, Input, RenderConfig, RenderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = Input::new("fn main() {\n    println!(\"hi\");\n}\n", "main.rs");
//! let options = RenderOptions {
//!     line_range: Some("1-2".to_string()),
//!     copy_to_clipboard: false,
//! };
//! let result = render_snippet(&input, &options, &RenderConfig::default())?;
//! println!("{}x{}", result.screenshot.width, result.screenshot.height);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod font;
pub mod input;
pub mod output;
pub mod range;
pub mod rendering;
pub mod syntax;
pub mod theme;

pub use input::{read_input, Input};
pub use output::{ClipboardSink, Delivery, FileSink, OutputSink};
pub use range::{Document, Excerpt, LineRange};
pub use rendering::layout::{compute_layout, LayoutMetrics};
pub use rendering::paint::Renderer;
pub use rendering::{Screenshot, Surface, TextMetrics};
pub use syntax::{SyntaxKind, SyntectTokenizer, Token, Tokenizer};
pub use theme::{Color, Palette, ThemeResolver};

use font::{FontFace, StagedFont};
use rendering::raster::RasterSurface;

// Upper bounds accepted by `RenderConfig::validate`
const MAX_FONT_SIZE: f32 = 1024.0;
const MAX_LINE_SPACING: f32 = 16.0;
const MAX_LENGTH: f32 = 16_384.0;
const MAX_TAB_WIDTH: usize = 64;

/// Geometry and output settings for a render
///
/// The defaults reproduce the classic look: 24 pixel text on 1.5 line
/// spacing, 40 units of padding, a 600 unit minimum width, and the dracula
/// palette, saved to `snippet.png`.
///
/// Every field may be omitted from a JSON config file.
///
/// ```
/// let cfg = code_snippet::RenderConfig::from_json_str(r#"{ "padding": 20 }"#).unwrap();
/// assert_eq!(cfg.padding, 20.0);
/// assert_eq!(cfg.font_size, 24.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per em for code, line numbers, and the title
    pub font_size: f32,
    /// Line height as a multiple of `font_size`
    pub line_spacing: f32,
    /// Outer padding on every side; the top gets an extra band for chrome
    pub padding: f32,
    /// Lower bound on the image width
    pub min_width: u32,
    /// Added to the widest line number to size the gutter
    pub gutter_margin: f32,
    /// Gap between the right edge of line numbers and the code column
    pub gutter_inset: f32,
    /// Spaces per tab
    pub tab_width: usize,
    /// Distance from the top padding to the first baseline
    pub chrome_offset: f32,
    /// Palette name; unknown names fall back to a plain palette
    pub theme: String,
    /// Where the PNG is written
    pub output_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            line_spacing: 1.5,
            padding: 40.0,
            min_width: 600,
            gutter_margin: 30.0,
            gutter_inset: 15.0,
            tab_width: 4,
            chrome_offset: 40.0,
            theme: theme::DEFAULT_THEME.to_string(),
            output_path: PathBuf::from("snippet.png"),
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: RenderConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Reject values that would produce an empty or degenerate canvas.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("font_size", self.font_size, MAX_FONT_SIZE),
            ("line_spacing", self.line_spacing, MAX_LINE_SPACING),
        ];
        for (name, value, max) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
            if value > max {
                return Err(Error::Config(format!("{} must be at most {}, got {}", name, max, value)));
            }
        }
        let non_negative = [
            ("padding", self.padding),
            ("gutter_margin", self.gutter_margin),
            ("gutter_inset", self.gutter_inset),
            ("chrome_offset", self.chrome_offset),
            ("min_width", self.min_width as f32),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!("{} must not be negative, got {}", name, value)));
            }
            if value > MAX_LENGTH {
                return Err(Error::Config(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_LENGTH, value
                )));
            }
        }
        if self.tab_width == 0 || self.tab_width > MAX_TAB_WIDTH {
            return Err(Error::Config(format!(
                "tab_width must be between 1 and {}, got {}",
                MAX_TAB_WIDTH, self.tab_width
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output_path must not be empty".into()));
        }
        Ok(())
    }
}

/// Per-invocation switches threaded into the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// `start-end`; `None` renders the whole document
    pub line_range: Option<String>,
    /// Also put the image on the OS clipboard
    pub copy_to_clipboard: bool,
}

/// A drawn and encoded image plus what produced it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub screenshot: Screenshot,
    pub layout: LayoutMetrics,
    /// Absolute number of the first rendered line
    pub start_line: usize,
    pub line_count: usize,
}

/// Result of [`render_snippet`].
#[derive(Debug, Clone)]
pub struct SnippetResult {
    pub screenshot: Screenshot,
    pub delivery: Delivery,
}

/// Select, tokenize, measure, draw, and encode `input`.
///
/// The embedded font is staged to a temporary file for the duration of the
/// call and removed on every return path.
pub fn render_png<Tk, Th>(
    input: &Input,
    options: &RenderOptions,
    config: &RenderConfig,
    tokenizer: &Tk,
    theme: &Th,
) -> Result<Rendered>
where
    Tk: Tokenizer + ?Sized,
    Th: ThemeResolver + ?Sized,
{
    config.validate()?;

    let document = Document::new(&input.text, config.tab_width);
    let excerpt = match options.line_range.as_deref() {
        Some(raw) => {
            let excerpt = range::select(&document, raw)?;
            log::debug!("extracted lines {} ({} lines)", raw, excerpt.document.line_count());
            excerpt
        }
        None => document.whole(),
    };

    let staged = StagedFont::embedded()?;
    let face = FontFace::load(staged.path(), config.font_size)?;

    let layout = compute_layout(&excerpt.document, excerpt.start_line, &face, config);
    layout.check_canvas()?;
    let tokens = tokenizer.tokenize(&excerpt.document.text(), &input.name)?;

    let mut surface = RasterSurface::new(layout.image_width, layout.image_height, &face);
    Renderer::new(config, &face, theme).draw(&mut surface, &tokens, &layout, excerpt.start_line, &input.name);
    let screenshot = surface.encode_png()?;
    log::debug!(
        "encoded {}x{} png ({} bytes)",
        screenshot.width,
        screenshot.height,
        screenshot.png_data.len()
    );

    Ok(Rendered {
        screenshot,
        layout,
        start_line: excerpt.start_line,
        line_count: excerpt.document.line_count(),
    })
}

/// Render with the bundled tokenizer and the configured palette, then copy
/// to the clipboard if requested and always save to `config.output_path`.
pub fn render_snippet(input: &Input, options: &RenderOptions, config: &RenderConfig) -> Result<SnippetResult> {
    let tokenizer = SyntectTokenizer::new();
    let theme = Palette::named_or_fallback(&config.theme);
    let rendered = render_png(input, options, config, &tokenizer, &theme)?;

    let mut file = FileSink::new(&config.output_path);
    let mut clipboard = ClipboardSink;
    let clipboard: Option<&mut dyn OutputSink> = if options.copy_to_clipboard {
        Some(&mut clipboard)
    } else {
        None
    };
    let delivery = output::fan_out(&rendered.screenshot, clipboard, &mut file)?;

    Ok(SnippetResult {
        screenshot: rendered.screenshot,
        delivery,
    })
}
