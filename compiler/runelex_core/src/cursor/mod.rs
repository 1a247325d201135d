//! Cursor over the input with a one-slot lookahead record.
//!
//! The cursor owns three offsets into a shared, immutable input:
//!
//! ```text
//!   input:  G E T \r \n H o s t
//!                 ^        ^
//!               start     pos
//!   window = input[start..pos] = "\r\n"
//! ```
//!
//! `start` marks the beginning of the lexeme that has not been emitted yet,
//! `pos` is the scan head. The code point most recently read by
//! [`next()`](Cursor::next) is kept in a one-slot [`Rune`] record so it can
//! be un-read exactly once by [`backward()`](Cursor::backward). Every other
//! operation that moves `start` or `pos` invalidates the slot, which is what
//! makes a second `backward()` detectable instead of corrupting the window.
//!
//! # Invariant
//!
//! `start <= pos <= len`, and both offsets sit on UTF-8 character
//! boundaries.

use std::sync::Arc;

use crate::charset::CharSet;
use crate::error::{ContractViolation, ScanError};
use crate::token::{Token, TokenKind};

/// A decoded code point and its UTF-8 width in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rune {
    pub ch: char,
    pub width: u32,
}

/// Scan state of one tokenization run.
#[derive(Clone, Debug)]
pub struct Cursor {
    input: Arc<str>,
    /// Beginning of the pending lexeme window.
    start: u32,
    /// Scan head.
    pos: u32,
    /// Code point read by the last `next()`, if it may still be un-read.
    last: Option<Rune>,
}

impl Cursor {
    /// Create a cursor at offset 0.
    pub fn new(input: impl Into<Arc<str>>) -> Result<Self, ScanError> {
        Self::starting_at(input, 0)
    }

    /// Create a cursor whose window and head both start at `offset`.
    ///
    /// Used to resume scanning after an error token, or to skip a prefix
    /// the grammar does not describe.
    pub fn starting_at(input: impl Into<Arc<str>>, offset: u32) -> Result<Self, ScanError> {
        let input = input.into();
        let len = u32::try_from(input.len())
            .map_err(|_| ScanError::InputTooLarge { len: input.len() })?;
        if offset > len {
            return Err(ScanError::StartOutOfBounds { offset, len });
        }
        if !input.is_char_boundary(offset as usize) {
            return Err(ScanError::StartNotCharBoundary { offset });
        }
        Ok(Self {
            input,
            start: offset,
            pos: offset,
            last: None,
        })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input length in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "length was checked against u32::MAX at construction"
    )]
    pub fn len(&self) -> u32 {
        self.input.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Beginning of the pending lexeme window.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Current scan head.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The code point `backward()` would un-read, if any.
    pub fn last_rune(&self) -> Option<Rune> {
        self.last
    }

    /// Returns `true` once the head has reached the end of the input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.input.len()
    }

    /// Input from the head to the end.
    #[inline]
    pub fn rest(&self) -> &str {
        &self.input[self.pos as usize..]
    }

    /// The pending lexeme `input[start..pos]`.
    #[inline]
    pub fn window(&self) -> &str {
        &self.input[self.start as usize..self.pos as usize]
    }

    /// Decode one code point at the head and advance past it.
    ///
    /// Returns `None` at end of input without moving; the lookahead slot is
    /// cleared in that case, so a following `backward()` is a violation.
    #[allow(
        clippy::should_implement_trait,
        reason = "the cursor can un-read, so it is not an Iterator"
    )]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8() is at most 4"
    )]
    pub fn next(&mut self) -> Option<char> {
        let Some(ch) = self.rest().chars().next() else {
            self.last = None;
            return None;
        };
        let width = ch.len_utf8() as u32;
        self.pos += width;
        self.last = Some(Rune { ch, width });
        Some(ch)
    }

    /// Look at the code point at the head without consuming it.
    ///
    /// Leaves the head and the lookahead slot untouched, so calling it any
    /// number of times in a row returns the same answer.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Un-read the code point returned by the last `next()`.
    ///
    /// The slot is consumed: calling this again before another `next()`
    /// leaves the cursor unchanged and reports
    /// [`ContractViolation::BackwardWithoutNext`].
    pub fn backward(&mut self) -> Result<(), ContractViolation> {
        match self.last.take() {
            Some(rune) => {
                self.pos -= rune.width;
                debug_assert!(self.start <= self.pos, "backward() crossed the window start");
                Ok(())
            }
            None => Err(ContractViolation::BackwardWithoutNext { pos: self.pos }),
        }
    }

    /// Consume one code point if `set` contains it.
    ///
    /// On a miss the head is unchanged.
    pub fn accept<S: CharSet + ?Sized>(&mut self, set: &S) -> bool {
        match self.next() {
            Some(c) if set.contains(c) => true,
            Some(_) => {
                self.unread();
                false
            }
            None => false,
        }
    }

    /// Greedily consume code points contained in `set`.
    ///
    /// Returns how many were consumed; zero leaves the cursor untouched.
    pub fn accept_run<S: CharSet + ?Sized>(&mut self, set: &S) -> u32 {
        let mut count = 0;
        while self.accept(set) {
            count += 1;
        }
        count
    }

    /// Consume exactly `n` code points from `set`, or nothing at all.
    pub fn accept_exactly<S: CharSet + ?Sized>(&mut self, set: &S, n: u32) -> bool {
        let (pos, last) = (self.pos, self.last);
        for _ in 0..n {
            if !self.accept(set) {
                self.pos = pos;
                self.last = last;
                return false;
            }
        }
        true
    }

    /// Consume `literal` if the input continues with it.
    ///
    /// An empty literal never matches. The lookahead slot is cleared on a
    /// match.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the literal is a prefix of the remaining input"
    )]
    pub fn accept_literal(&mut self, literal: &str) -> bool {
        if literal.is_empty() || !self.rest().starts_with(literal) {
            return false;
        }
        self.pos += literal.len() as u32;
        self.last = None;
        true
    }

    /// Advance the head by `len` bytes.
    ///
    /// `len` must land on a character boundary within the input.
    pub(crate) fn advance_bytes(&mut self, len: u32) {
        debug_assert!(
            self.input.is_char_boundary((self.pos + len) as usize),
            "advance_bytes({len}) splits a character at offset {}",
            self.pos
        );
        self.pos += len;
        self.last = None;
    }

    /// Drop the pending window: `start = pos`.
    #[inline]
    pub fn ignore(&mut self) {
        self.start = self.pos;
        self.last = None;
    }

    /// Cut the window into a token and collapse it.
    ///
    /// Within a scan this is reached only through `ScanContext::emit`, the
    /// single point where tokens are produced.
    pub fn take_token(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, self.window(), self.start);
        self.ignore();
        token
    }

    /// Cut the window into an Error token carrying `message`.
    pub fn take_error(&mut self, message: impl Into<String>) -> Token {
        let token = Token::error(self.window(), self.start, message);
        self.ignore();
        token
    }

    /// Un-read after a failed `accept`; the slot was filled by that `next()`.
    fn unread(&mut self) {
        if let Some(rune) = self.last.take() {
            self.pos -= rune.width;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
