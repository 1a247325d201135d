//! Tokens and token kinds.

use std::fmt;
use std::ops::Range;

/// Closed set of token kinds.
///
/// Structural kinds (`Crlf`, `Eof`) carry no information in their text;
/// every other kind is data-bearing and its text is the matched lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unmatched input or a grammar defect. The diagnostic is in
    /// [`Token::message`].
    Error,
    /// Text a grammar collected without classifying it.
    Unclassified,
    Digit,
    Alpha,
    Crlf,
    Octet,
    /// A run of one repeated character class.
    Run,
    Eof,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Error,
        TokenKind::Unclassified,
        TokenKind::Digit,
        TokenKind::Alpha,
        TokenKind::Crlf,
        TokenKind::Octet,
        TokenKind::Run,
        TokenKind::Eof,
    ];

    /// Returns `true` for kinds whose text callers may ignore.
    #[inline]
    pub const fn is_structural(self) -> bool {
        matches!(self, TokenKind::Crlf | TokenKind::Eof)
    }

    /// Stable upper-case identifier, as used in terminal tables.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Error => "ERROR",
            TokenKind::Unclassified => "UNCLASSIFIED",
            TokenKind::Digit => "DIGIT",
            TokenKind::Alpha => "ALPHA",
            TokenKind::Crlf => "CRLF",
            TokenKind::Octet => "OCTET",
            TokenKind::Run => "RUN",
            TokenKind::Eof => "EOF",
        }
    }

    /// Inverse of [`name()`](Self::name). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of characters shown before a long token is elided in `Display`.
const DISPLAY_CHARS: usize = 10;

/// A lexeme cut from the input.
///
/// Invariant: `text == input[offset..offset + len]` for the input the token
/// was scanned from. Only [`TokenKind::Error`] tokens carry a `message`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
    offset: u32,
    len: u32,
    message: Option<String>,
}

impl Token {
    /// Create a token over `text`, which starts at byte `offset`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token text is a slice of an input bounded to u32::MAX bytes"
    )]
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: u32) -> Self {
        let text = text.into();
        let len = text.len() as u32;
        Self {
            kind,
            text,
            offset,
            len,
            message: None,
        }
    }

    /// Create an Error token over `text` carrying a diagnostic.
    pub fn error(text: impl Into<String>, offset: u32, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(TokenKind::Error, text, offset)
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the first byte of the lexeme.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Byte length of the lexeme.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset one past the lexeme.
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }

    /// Byte range of the lexeme in the input.
    pub fn range(&self) -> Range<usize> {
        self.offset as usize..self.end() as usize
    }

    /// Diagnostic of an Error token.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Error => f.write_str(self.message.as_deref().unwrap_or(&self.text)),
            _ => match self.text.char_indices().nth(DISPLAY_CHARS) {
                Some((cut, _)) => write!(f, "{:?}...", &self.text[..cut]),
                None => write!(f, "{:?}", self.text),
            },
        }
    }
}
