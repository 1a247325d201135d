//! Whole-string tokenizer over a regex alternation.
//!
//! The ordered terminals `(kind, pattern)` are compiled into one regex
//! `(?P<t0>p0)|(?P<t1>p1)|...`. Each pull matches at the cursor and
//! reclassifies the match by the group that captured it, so among
//! alternatives matching at the same offset the first declared wins.
//!
//! Unlike the state-machine engine this needs the whole input up front.

use regex::Regex;
use runelex_core::{Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

/// Failure to build a [`RegexTokenizer`] or to tokenize with it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegexTokenizerError {
    #[error("no terminals to compile")]
    NoTerminals,
    #[error("invalid pattern for {kind}: {source}")]
    InvalidPattern { kind: TokenKind, source: regex::Error },
    /// A pattern that matches `""` would stall the cursor.
    #[error("pattern for {kind} matches the empty string")]
    EmptyMatch { kind: TokenKind },
    #[error("failed to compile the terminal alternation: {0}")]
    Alternation(#[source] regex::Error),
    /// No terminal matches at the cursor.
    #[error("no terminal matches at offset {offset}")]
    Unmatched { offset: u32 },
    #[error("input of {len} bytes exceeds the {max} byte limit", max = u32::MAX)]
    InputTooLarge { len: usize },
}

/// Compiled terminal alternation.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    alternation: Regex,
    /// Token kind of each capture group, indexed by group number.
    groups: Vec<Option<TokenKind>>,
}

impl RegexTokenizer {
    /// Compile `terminals` in priority order.
    ///
    /// Each pattern is checked on its own first so errors name the terminal
    /// at fault.
    pub fn new(terminals: &[(TokenKind, &str)]) -> Result<Self, RegexTokenizerError> {
        if terminals.is_empty() {
            return Err(RegexTokenizerError::NoTerminals);
        }
        for &(kind, pattern) in terminals {
            let single = Regex::new(pattern)
                .map_err(|source| RegexTokenizerError::InvalidPattern { kind, source })?;
            if single.is_match("") {
                return Err(RegexTokenizerError::EmptyMatch { kind });
            }
        }

        let source = terminals
            .iter()
            .enumerate()
            .map(|(index, (_, pattern))| format!("(?P<t{index}>{pattern})"))
            .collect::<Vec<_>>()
            .join("|");
        let alternation = Regex::new(&source).map_err(RegexTokenizerError::Alternation)?;
        debug!(
            alternation = %source,
            terminals = terminals.len(),
            "compiled terminal alternation"
        );

        let groups = alternation
            .capture_names()
            .map(|name| {
                let index: usize = name?.strip_prefix('t')?.parse().ok()?;
                terminals.get(index).map(|&(kind, _)| kind)
            })
            .collect();
        Ok(Self {
            alternation,
            groups,
        })
    }

    /// The HTTP/1.0 terminals, one character per `ALPHA` token.
    pub fn http() -> Result<Self, RegexTokenizerError> {
        Self::new(&[(TokenKind::Crlf, r"\r\n"), (TokenKind::Alpha, "[A-Za-z]")])
    }

    /// The compiled alternation.
    pub fn as_str(&self) -> &str {
        self.alternation.as_str()
    }

    /// Iterate the tokens of `input`.
    ///
    /// The iterator yields `Ok` tokens in order, ends with `None` once the
    /// input is consumed, and stops after the first `Err`.
    pub fn tokenize<'t>(&'t self, input: &'t str) -> RegexTokens<'t> {
        RegexTokens {
            tokenizer: self,
            input,
            cursor: 0,
            done: false,
        }
    }

    fn kind_of(&self, captures: &regex::Captures<'_>) -> Option<TokenKind> {
        self.groups
            .iter()
            .copied()
            .enumerate()
            .find_map(|(group, kind)| kind.filter(|_| captures.get(group).is_some()))
    }
}

/// Iterator returned by [`RegexTokenizer::tokenize`].
#[derive(Debug)]
pub struct RegexTokens<'t> {
    tokenizer: &'t RegexTokenizer,
    input: &'t str,
    cursor: usize,
    done: bool,
}

impl RegexTokens<'_> {
    fn fail(&mut self, error: RegexTokenizerError) -> Option<Result<Token, RegexTokenizerError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl Iterator for RegexTokens<'_> {
    type Item = Result<Token, RegexTokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor >= self.input.len() {
            return None;
        }
        let (Ok(_), Ok(offset)) = (u32::try_from(self.input.len()), u32::try_from(self.cursor))
        else {
            return self.fail(RegexTokenizerError::InputTooLarge {
                len: self.input.len(),
            });
        };

        let (tokenizer, input) = (self.tokenizer, self.input);
        let matched = tokenizer
            .alternation
            .captures(&input[self.cursor..])
            .and_then(|captures| {
                let whole = captures.get(0)?;
                let kind = tokenizer.kind_of(&captures)?;
                Some((whole, kind))
            });
        // A match further along would skip input; that is unmatched too.
        let Some((whole, kind)) =
            matched.filter(|(whole, _)| whole.start() == 0 && whole.end() > 0)
        else {
            return self.fail(RegexTokenizerError::Unmatched { offset });
        };

        trace!(kind = %kind, offset, len = whole.len(), "regex match");
        self.cursor += whole.end();
        Some(Ok(Token::new(kind, whole.as_str(), offset)))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
