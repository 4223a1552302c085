//! The staged font must be gone after every render, successful or not.
//!
//! Kept in its own test binary because it points TMPDIR at a private
//! directory.

use std::cell::Cell;
use std::path::Path;

use code_snippet::{render_png, Error, Input, Palette, RenderConfig, RenderOptions, SyntectTokenizer, Token, Tokenizer};

fn staged_fonts(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("code-font-"))
        .count()
}

/// Fails after checking the font is staged while tokenizing.
struct Failing<'a> {
    dir: &'a Path,
    staged_during_call: Cell<usize>,
}

impl Tokenizer for Failing<'_> {
    fn tokenize(&self, _text: &str, _hint: &str) -> code_snippet::Result<Vec<Token>> {
        self.staged_during_call.set(staged_fonts(self.dir));
        Err(Error::Tokenize("lexer exploded".into()))
    }
}

#[test]
fn staged_font_is_removed_on_success_and_failure() {
    let scratch = tempfile::tempdir().unwrap();
    std::env::set_var("TMPDIR", scratch.path());

    let input = Input::new("package main\n", "main.go");
    let config = RenderConfig::default();

    let failing = Failing {
        dir: scratch.path(),
        staged_during_call: Cell::new(0),
    };
    let err = render_png(&input, &RenderOptions::default(), &config, &failing, &Palette::default()).unwrap_err();
    assert!(matches!(err, Error::Tokenize(_)));
    assert_eq!(failing.staged_during_call.get(), 1);
    assert_eq!(staged_fonts(scratch.path()), 0);

    render_png(&input, &RenderOptions::default(), &config, &SyntectTokenizer::new(), &Palette::default()).unwrap();
    assert_eq!(staged_fonts(scratch.path()), 0);
}
