//! Where the source text comes from

use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::syntax::STDIN_NAME;

/// Source text plus the name shown in the title bar and used as a lexer hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub text: String,
    pub name: String,
}

impl Input {
    pub fn new(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: name.into(),
        }
    }
}

/// Read a file by path. The display name is the file's base name.
pub fn read_file(path: &Path) -> Result<Input> {
    let bytes = std::fs::read(path).map_err(|source| Error::Input {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    non_empty(Input::new(String::from_utf8_lossy(&bytes), name))
}

/// Read everything from `reader` as piped input.
pub fn read_piped<R: Read>(mut reader: R) -> Result<Input> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|source| Error::Input {
        path: STDIN_NAME.to_string(),
        source,
    })?;
    non_empty(Input::new(String::from_utf8_lossy(&bytes), STDIN_NAME))
}

/// Resolve the input: the file argument if given, otherwise stdin when it is
/// not an interactive terminal. Anything else is [`Error::EmptyInput`].
pub fn read_input(path: Option<&Path>) -> Result<Input> {
    if let Some(path) = path {
        return read_file(path);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        log::debug!("stdin is a terminal and no file was given");
        return Err(Error::EmptyInput);
    }
    read_piped(stdin.lock())
}

fn non_empty(input: Input) -> Result<Input> {
    if input.text.is_empty() {
        Err(Error::EmptyInput)
    } else {
        Ok(input)
    }
}
