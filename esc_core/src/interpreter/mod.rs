//! FileToken interpretation
//!
//! Turns a flat token list such as `["b.go", "32", "a.go"]` into file specs.
//! A token is a line number only when it directly follows a filename that has
//! not yet absorbed one; otherwise every token names a file.

use std::fmt;

/// A file to open and the line to jump to (`0` means no jump)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSpec {
    pub path: String,
    pub line: u32,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    pub fn without_line(path: impl Into<String>) -> Self {
        Self::new(path, 0)
    }

    pub fn has_line(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_line() {
            write!(f, "{}:{}", self.path, self.line)
        } else {
            write!(f, "{}", self.path)
        }
    }
}

/// Pair tokens with their line numbers, in command-line order
pub fn pair_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<FileSpec> {
    let mut specs = Vec::with_capacity(tokens.len());
    let mut open: Option<FileSpec> = None;

    for token in tokens {
        let token = token.as_ref();
        open = match open.take() {
            None => Some(FileSpec::without_line(token)),
            Some(mut pending) => match parse_line_number(token) {
                Some(line) => {
                    pending.line = line;
                    specs.push(pending);
                    None
                }
                None => {
                    specs.push(pending);
                    Some(FileSpec::without_line(token))
                }
            },
        };
    }

    if let Some(pending) = open {
        specs.push(pending);
    }

    specs
}

/// Pair tokens and reverse the result, ready for rendering
pub fn interpret<S: AsRef<str>>(tokens: &[S]) -> Vec<FileSpec> {
    let mut specs = pair_tokens(tokens);
    specs.reverse();
    specs
}

// "+3" is a line number; "-3" and values past u32 stay filenames.
fn parse_line_number(token: &str) -> Option<u32> {
    token.parse().ok()
}
