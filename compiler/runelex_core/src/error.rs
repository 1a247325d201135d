//! Error types for scanner setup, rule tables, pulls, and grammar defects.
//!
//! Scan-level failures (unmatched input) are never errors here: they travel
//! to the consumer as [`TokenKind::Error`](crate::TokenKind::Error) tokens.

use std::time::Duration;

use thiserror::Error;

/// Failure to set up a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Offsets are `u32`; longer inputs cannot be addressed.
    #[error("input of {len} bytes exceeds the {max} byte limit", max = u32::MAX)]
    InputTooLarge { len: usize },
    /// `start_at` points past the end of the input.
    #[error("start offset {offset} is past the end of the {len} byte input")]
    StartOutOfBounds { offset: u32, len: u32 },
    /// `start_at` splits a UTF-8 sequence.
    #[error("start offset {offset} is not on a character boundary")]
    StartNotCharBoundary { offset: u32 },
    #[error("token channel capacity must be at least 1")]
    ZeroCapacity,
    /// Thread names cannot contain NUL bytes.
    #[error("scanner thread name {name:?} contains a NUL byte")]
    InvalidThreadName { name: String },
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Rejected rule table declaration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule `{0}` is declared more than once")]
    Duplicate(String),
    #[error("rule `{0}` has an empty literal")]
    EmptyLiteral(String),
    #[error("rule `{0}` has a character class that matches nothing")]
    EmptyClass(String),
}

/// Failure to pull the next token.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PullError {
    /// No token arrived in time. The scan has been cancelled.
    #[error("no token within {0:?}; scan cancelled")]
    Timeout(Duration),
}

/// A state function broke the engine's contract.
///
/// These are defects in the supplied grammar, not in the input data.
/// [`ContractPolicy`](crate::ContractPolicy) decides whether they panic or
/// become an Error token that halts the run.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ContractViolation {
    /// `backward()` with no code point to un-read (twice in a row, or right
    /// after an emit/ignore).
    #[error("backward() at offset {pos} without a preceding next()")]
    BackwardWithoutNext { pos: u32 },
    /// A state returned a continuation without moving the window. Emitting
    /// only empty tokens does not count as progress.
    #[error(
        "state `{state}` returned a continuation at offset {pos} without consuming input or emitting a non-empty token"
    )]
    NoProgress { state: &'static str, pos: u32 },
    #[error("scan exceeded the limit of {limit} steps at offset {pos}")]
    StepLimit { limit: u64, pos: u32 },
}
