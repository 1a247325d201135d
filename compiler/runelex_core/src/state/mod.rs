//! State functions and the context they scan through.
//!
//! A grammar is a set of [`StateFn`] values. Each one is called with a
//! [`ScanContext`] borrowing the driver's cursor, sink, and rule table for
//! the duration of a single transition, and returns the state to run next,
//! or `None` to stop.
//!
//! The contract a state function must keep:
//!
//! - at end of input, emit [`TokenKind::Eof`] before returning `None`;
//! - a returned continuation must follow a consumed code point or a
//!   non-empty emitted token, otherwise the driver reports
//!   [`ContractViolation::NoProgress`];
//! - [`backward()`](ScanContext::backward) at most once per
//!   [`next()`](ScanContext::next).

use std::fmt;

use tracing::trace;

use crate::channel::TokenSink;
use crate::charset::CharSet;
use crate::cursor::Cursor;
use crate::error::ContractViolation;
use crate::rules::RuleTable;
use crate::token::{Token, TokenKind};

/// A named state of a grammar.
///
/// Two states are equal when they have the same name.
#[derive(Clone, Copy)]
pub struct StateFn {
    name: &'static str,
    step: fn(&mut ScanContext<'_>) -> Option<StateFn>,
}

impl StateFn {
    pub const fn new(name: &'static str, step: fn(&mut ScanContext<'_>) -> Option<StateFn>) -> Self {
        Self { name, step }
    }

    /// Name used in traces and diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run one transition.
    #[inline]
    pub fn call(self, cx: &mut ScanContext<'_>) -> Option<StateFn> {
        (self.step)(cx)
    }
}

impl PartialEq for StateFn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StateFn {}

impl fmt::Debug for StateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateFn({})", self.name)
    }
}

/// What a state function sees during one transition.
pub struct ScanContext<'s> {
    name: &'s str,
    cursor: &'s mut Cursor,
    sink: &'s mut dyn TokenSink,
    rules: &'s RuleTable,
    emitted: u32,
    violation: Option<ContractViolation>,
    disconnected: bool,
}

impl<'s> ScanContext<'s> {
    pub(crate) fn new(
        name: &'s str,
        cursor: &'s mut Cursor,
        sink: &'s mut dyn TokenSink,
        rules: &'s RuleTable,
    ) -> Self {
        Self {
            name,
            cursor,
            sink,
            rules,
            emitted: 0,
            violation: None,
            disconnected: false,
        }
    }

    /// Name of the scanner, for diagnostics.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn rules(&self) -> &'s RuleTable {
        self.rules
    }

    pub fn input(&self) -> &str {
        self.cursor.input()
    }

    pub fn start(&self) -> u32 {
        self.cursor.start()
    }

    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    pub fn at_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// The pending lexeme `input[start..pos]`.
    pub fn window(&self) -> &str {
        self.cursor.window()
    }

    /// Input from the head to the end.
    pub fn rest(&self) -> &str {
        self.cursor.rest()
    }

    #[allow(
        clippy::should_implement_trait,
        reason = "mirrors Cursor::next, which can be un-read"
    )]
    pub fn next(&mut self) -> Option<char> {
        self.cursor.next()
    }

    pub fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    /// Un-read the last code point read by [`next()`](Self::next).
    ///
    /// Without one to un-read the cursor is left alone and the violation is
    /// handed to the driver when the transition returns.
    pub fn backward(&mut self) {
        if let Err(violation) = self.cursor.backward() {
            self.violation.get_or_insert(violation);
        }
    }

    pub fn accept<S: CharSet + ?Sized>(&mut self, set: &S) -> bool {
        self.cursor.accept(set)
    }

    pub fn accept_run<S: CharSet + ?Sized>(&mut self, set: &S) -> u32 {
        self.cursor.accept_run(set)
    }

    pub fn accept_exactly<S: CharSet + ?Sized>(&mut self, set: &S, n: u32) -> bool {
        self.cursor.accept_exactly(set, n)
    }

    pub fn accept_literal(&mut self, literal: &str) -> bool {
        self.cursor.accept_literal(literal)
    }

    /// Consume the longest rule match at the head and return its kind.
    ///
    /// Nothing is consumed when no rule matches.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the match is a prefix of an input bounded to u32::MAX bytes"
    )]
    pub fn accept_longest_rule(&mut self) -> Option<TokenKind> {
        let rules = self.rules;
        let (rule, len) = rules.longest_match(self.cursor.rest())?;
        self.cursor.advance_bytes(len as u32);
        Some(rule.kind())
    }

    /// Drop the pending window without emitting it.
    pub fn ignore(&mut self) {
        self.cursor.ignore();
    }

    /// Emit the window as a token of `kind` and collapse it.
    ///
    /// After the consumer hangs up, tokens are dropped and the driver halts
    /// once the transition returns.
    pub fn emit(&mut self, kind: TokenKind) {
        let token = self.cursor.take_token(kind);
        trace!(
            scanner = self.name,
            kind = %token.kind(),
            offset = token.offset(),
            len = token.len(),
            "emit"
        );
        self.deliver(token);
    }

    /// Emit an Error token carrying `message`.
    ///
    /// The token covers the pending window, or the next code point when the
    /// window is empty, so the offending character is always visible.
    pub fn emit_error(&mut self, message: impl Into<String>) {
        if self.cursor.window().is_empty() {
            self.cursor.next();
        }
        let token = self.cursor.take_error(message);
        trace!(
            scanner = self.name,
            offset = token.offset(),
            message = token.message(),
            "emit error"
        );
        self.deliver(token);
    }

    pub(crate) fn emitted(&self) -> u32 {
        self.emitted
    }

    pub(crate) fn violation(&self) -> Option<ContractViolation> {
        self.violation
    }

    pub(crate) fn disconnected(&self) -> bool {
        self.disconnected
    }

    fn deliver(&mut self, token: Token) {
        self.emitted += 1;
        if self.disconnected {
            return;
        }
        if self.sink.push(token).is_err() {
            self.disconnected = true;
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
