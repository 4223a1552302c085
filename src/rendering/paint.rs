//! The draw pass: chrome, gutter, and token-by-token text

use crate::rendering::layout::LayoutMetrics;
use crate::rendering::{Surface, TextMetrics};
use crate::syntax::Token;
use crate::theme::{Color, ThemeResolver};
use crate::RenderConfig;

/// Traffic-light markers: center x, color. All share `CHROME_Y` and radius.
const WINDOW_CONTROLS: [(f32, Color); 3] = [
    (30.0, Color::hex(0xff5f56)),
    (55.0, Color::hex(0xffbd2e)),
    (80.0, Color::hex(0x27c93f)),
];
const CHROME_Y: f32 = 30.0;
const CONTROL_RADIUS: f32 = 8.0;
/// Gap kept between the last marker and a long title
const TITLE_GAP: f32 = 16.0;

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Clear {
        rgb: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        rgb: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        rgb: Color,
    },
}

/// A [`Surface`] that records commands instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    /// Text commands in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            PaintCommand::Text { x, y, text, rgb } => Some((text.as_str(), *x, *y, *rgb)),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(PaintCommand::Clear { rgb: color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(PaintCommand::Circle { cx, cy, radius, rgb: color });
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, color: Color) {
        self.commands.push(PaintCommand::Text {
            x,
            y: baseline,
            text: text.to_string(),
            rgb: color,
        });
    }
}

/// Cursor state owned by a single draw pass.
#[derive(Debug)]
struct CanvasState {
    x: f32,
    y: f32,
    color: Color,
    line: usize,
}

/// Draws a token stream onto a surface sized by a prior [`LayoutMetrics`].
pub struct Renderer<'a, M: ?Sized, T: ?Sized> {
    pub config: &'a RenderConfig,
    pub metrics: &'a M,
    pub theme: &'a T,
}

impl<'a, M, T> Renderer<'a, M, T>
where
    M: TextMetrics + ?Sized,
    T: ThemeResolver + ?Sized,
{
    pub fn new(config: &'a RenderConfig, metrics: &'a M, theme: &'a T) -> Self {
        Self { config, metrics, theme }
    }

    /// Paint background, chrome, and all tokens.
    ///
    /// `title` is centered on the chrome row; `start_line` is the absolute
    /// number of the first rendered line.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        tokens: &[Token],
        layout: &LayoutMetrics,
        start_line: usize,
        title: &str,
    ) {
        surface.clear(self.theme.background());
        self.draw_window_chrome(surface, title);

        let code_x = layout.code_x(self.config);
        let mut state = CanvasState {
            x: code_x,
            y: layout.first_baseline(self.config),
            color: self.theme.foreground(),
            line: start_line,
        };

        if start_line <= layout.last_line {
            self.draw_line_number(surface, layout, state.line, state.y);
        }

        for token in tokens {
            if token.is_newline() {
                state.x = code_x;
                state.y += layout.line_height;
                state.line += 1;
                if state.line <= layout.last_line {
                    self.draw_line_number(surface, layout, state.line, state.y);
                }
                continue;
            }

            state.color = self.theme.color_for(token.kind);
            surface.draw_text(&token.text, state.x, state.y, state.color);
            state.x += self.metrics.measure(&token.text);
        }
    }

    fn draw_window_chrome<S: Surface + ?Sized>(&self, surface: &mut S, title: &str) {
        for (cx, color) in WINDOW_CONTROLS {
            surface.fill_circle(cx, CHROME_Y, CONTROL_RADIUS, color);
        }

        if title.is_empty() {
            return;
        }
        let controls_right = WINDOW_CONTROLS[2].0 + CONTROL_RADIUS + TITLE_GAP;
        let width = self.metrics.measure(title);
        let x = ((surface.width() as f32 - width) / 2.0).max(controls_right);
        let baseline = CHROME_Y + self.metrics.font_size() / 3.0;
        surface.draw_text(title, x, baseline, self.theme.foreground());
    }

    fn draw_line_number<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        layout: &LayoutMetrics,
        line: usize,
        baseline: f32,
    ) {
        let label = line.to_string();
        let x = layout.gutter_right(self.config) - self.metrics.measure(&label);
        surface.draw_text(&label, x, baseline, self.theme.foreground());
    }
}
