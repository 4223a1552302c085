//! Built-in color palettes and per-token color resolution

use crate::syntax::SyntaxKind;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Maps token kinds to colors.
pub trait ThemeResolver {
    /// The color for `kind`, or `None` when the theme leaves it unset and the
    /// default foreground should be used.
    fn resolve(&self, kind: SyntaxKind) -> Option<Color>;

    /// Canvas fill color
    fn background(&self) -> Color;

    /// Color for unset entries, line numbers, and the title
    fn foreground(&self) -> Color;

    /// The draw color for `kind` with the foreground fallback applied.
    fn color_for(&self, kind: SyntaxKind) -> Color {
        self.resolve(kind).unwrap_or_else(|| self.foreground())
    }
}

/// A fixed palette: background, foreground, and a table of set entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    entries: &'static [(SyntaxKind, Color)],
}

pub const DEFAULT_THEME: &str = "dracula";

const DRACULA: Palette = Palette {
    name: "dracula",
    background: Color::hex(0x282a36),
    foreground: Color::hex(0xf8f8f2),
    entries: &[
        (SyntaxKind::Comment, Color::hex(0x6272a4)),
        (SyntaxKind::Keyword, Color::hex(0xff79c6)),
        (SyntaxKind::String, Color::hex(0xf1fa8c)),
        (SyntaxKind::Number, Color::hex(0xbd93f9)),
        (SyntaxKind::Constant, Color::hex(0xbd93f9)),
        (SyntaxKind::Function, Color::hex(0x50fa7b)),
        (SyntaxKind::Type, Color::hex(0x8be9fd)),
        (SyntaxKind::Operator, Color::hex(0xff79c6)),
        (SyntaxKind::Parameter, Color::hex(0xffb86c)),
        (SyntaxKind::Tag, Color::hex(0xff79c6)),
        (SyntaxKind::Attribute, Color::hex(0x50fa7b)),
        (SyntaxKind::Invalid, Color::hex(0xff5555)),
    ],
};

// Used when a theme name does not resolve.
const FALLBACK: Palette = Palette {
    name: "fallback",
    background: Color::hex(0x202020),
    foreground: Color::hex(0xd0d0d0),
    entries: &[
        (SyntaxKind::Comment, Color::hex(0x808080)),
        (SyntaxKind::Keyword, Color::hex(0xe0a060)),
        (SyntaxKind::String, Color::hex(0x90c070)),
    ],
};

impl Palette {
    /// Look up a built-in palette by (case-insensitive) name.
    pub fn named(name: &str) -> Option<Palette> {
        match name.to_ascii_lowercase().as_str() {
            "dracula" => Some(DRACULA),
            _ => None,
        }
    }

    /// Look up `name`, falling back to a plain palette with a warning.
    pub fn named_or_fallback(name: &str) -> Palette {
        Self::named(name).unwrap_or_else(|| {
            log::warn!("unknown theme '{}', using fallback palette", name);
            FALLBACK
        })
    }

    pub fn fallback() -> Palette {
        FALLBACK
    }
}

impl Default for Palette {
    fn default() -> Self {
        DRACULA
    }
}

impl ThemeResolver for Palette {
    fn resolve(&self, kind: SyntaxKind) -> Option<Color> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, color)| *color)
    }

    fn background(&self) -> Color {
        self.background
    }

    fn foreground(&self) -> Color {
        self.foreground
    }
}
