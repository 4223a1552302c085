//! Tokenization of source text into colored-by-kind fragments
//!
//! The renderer only cares about an ordered stream of `(text, kind)` pairs
//! with explicit newline tokens. [`SyntectTokenizer`] produces that stream
//! from `syntect`'s bundled grammars by classifying the innermost scope of
//! every fragment into a [`SyntaxKind`].

use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result};

/// Display name used for piped input; never used as a filename hint.
pub const STDIN_NAME: &str = "Stdin";

/// Syntax to use when neither the filename nor the content identifies one.
const FALLBACK_SYNTAX: &str = "Go";

/// Coarse syntactic category of a token, the key for theme lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Text,
    Comment,
    Keyword,
    String,
    Number,
    Constant,
    Function,
    Type,
    Operator,
    Punctuation,
    Variable,
    Parameter,
    Tag,
    Attribute,
    Invalid,
}

impl SyntaxKind {
    /// Classify a single scope like `keyword.control.go`.
    ///
    /// Returns `None` for scopes that carry no color information on their
    /// own (`source.*`, `meta.*`, ...), so an outer scope can decide.
    pub fn from_scope(scope: &str) -> Option<Self> {
        const PREFIXES: &[(&str, SyntaxKind)] = &[
            ("comment", SyntaxKind::Comment),
            ("punctuation.definition.comment", SyntaxKind::Comment),
            ("punctuation.definition.string", SyntaxKind::String),
            ("string", SyntaxKind::String),
            ("constant.numeric", SyntaxKind::Number),
            ("constant.character.escape", SyntaxKind::String),
            ("constant", SyntaxKind::Constant),
            ("keyword.operator", SyntaxKind::Operator),
            ("keyword", SyntaxKind::Keyword),
            ("storage.type", SyntaxKind::Type),
            ("storage", SyntaxKind::Keyword),
            ("entity.name.function", SyntaxKind::Function),
            ("support.function", SyntaxKind::Function),
            ("variable.function", SyntaxKind::Function),
            ("entity.name.tag", SyntaxKind::Tag),
            ("entity.other.attribute-name", SyntaxKind::Attribute),
            ("entity.name", SyntaxKind::Type),
            ("entity.other.inherited-class", SyntaxKind::Type),
            ("support.type", SyntaxKind::Type),
            ("support.class", SyntaxKind::Type),
            ("variable.parameter", SyntaxKind::Parameter),
            ("variable.language", SyntaxKind::Constant),
            ("variable", SyntaxKind::Variable),
            ("punctuation", SyntaxKind::Punctuation),
            ("invalid", SyntaxKind::Invalid),
        ];

        PREFIXES
            .iter()
            .find(|(prefix, _)| {
                scope == *prefix
                    || (scope.starts_with(prefix) && scope.as_bytes().get(prefix.len()) == Some(&b'.'))
            })
            .map(|(_, kind)| *kind)
    }

    /// Classify a full scope stack; the innermost classifiable scope wins.
    pub fn from_stack(stack: &[Scope]) -> Self {
        stack
            .iter()
            .rev()
            .find_map(|scope| Self::from_scope(&scope.build_string()))
            .unwrap_or(SyntaxKind::Text)
    }
}

/// One lexical fragment. A token whose text is exactly `"\n"` marks a line
/// break and is never drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: SyntaxKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: SyntaxKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn newline() -> Self {
        Self::new("\n", SyntaxKind::Text)
    }

    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Something that can split source text into tokens.
pub trait Tokenizer {
    /// Tokenize `text`. `hint` is a filename (or [`STDIN_NAME`]) used to pick
    /// a grammar.
    fn tokenize(&self, text: &str, hint: &str) -> Result<Vec<Token>>;
}

/// [`Tokenizer`] backed by syntect's default grammar set.
pub struct SyntectTokenizer {
    syntaxes: SyntaxSet,
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectTokenizer {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Pick a grammar: filename extension first, then content sniffing
    /// (shebangs, modelines), then Go.
    pub fn syntax_for(&self, text: &str, hint: &str) -> &SyntaxReference {
        let by_name = if hint.is_empty() || hint == STDIN_NAME {
            None
        } else {
            let path = std::path::Path::new(hint);
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| self.syntaxes.find_syntax_by_extension(ext))
                .or_else(|| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .and_then(|name| self.syntaxes.find_syntax_by_extension(name))
                })
        };

        by_name
            .or_else(|| {
                let first_line = text.lines().next().unwrap_or_default();
                self.syntaxes.find_syntax_by_first_line(first_line)
            })
            .or_else(|| {
                log::debug!("no grammar matched '{}', defaulting to {}", hint, FALLBACK_SYNTAX);
                self.syntaxes.find_syntax_by_name(FALLBACK_SYNTAX)
            })
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(&self, text: &str, hint: &str) -> Result<Vec<Token>> {
        let syntax = self.syntax_for(text, hint);
        log::debug!("tokenizing '{}' as {}", hint, syntax.name);

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(text) {
            let ops = state
                .parse_line(line, &self.syntaxes)
                .map_err(|e| Error::Tokenize(e.to_string()))?;

            for (fragment, op) in ScopeRegionIterator::new(&ops, line) {
                stack.apply(op).map_err(|e| Error::Tokenize(e.to_string()))?;
                if fragment.is_empty() {
                    continue;
                }
                let kind = SyntaxKind::from_stack(stack.as_slice());
                push_fragment(&mut tokens, fragment, kind);
            }
        }

        Ok(tokens)
    }
}

/// Append `fragment`, splitting out embedded line breaks as newline tokens.
fn push_fragment(tokens: &mut Vec<Token>, fragment: &str, kind: SyntaxKind) {
    let mut pieces = fragment.split('\n').peekable();
    while let Some(piece) = pieces.next() {
        let piece = piece.strip_suffix('\r').unwrap_or(piece);
        if !piece.is_empty() {
            tokens.push(Token::new(piece, kind));
        }
        if pieces.peek().is_some() {
            tokens.push(Token::newline());
        }
    }
}
