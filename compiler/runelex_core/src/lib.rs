//! Streaming state-machine tokenizer engine.
//!
//! A grammar is a chain of [`StateFn`]s. Each state function reads code
//! points through a [`ScanContext`], emits zero or more [`Token`]s over the
//! lexeme window `input[start..pos]`, and returns the next state (or `None`
//! to stop). The [`Driver`] runs that chain; a [`Scanner`] runs the driver on
//! its own thread and hands tokens to the consumer through a bounded channel,
//! while a [`Stepper`] advances it one transition at a time on the caller's
//! thread.
//!
//! ```text
//! Scanner::builder(name, input) ──spawn(initial)──▶ [scan thread: Driver]
//!                                                          │ emit
//!                                                          ▼
//!           consumer ◀── next_token() ── bounded FIFO (capacity 2)
//! ```
//!
//! This crate knows nothing about any concrete protocol. Terminal tables
//! arrive as a [`RuleTable`]; the only grammar shipped here is the generic
//! table-driven state [`TABLE`].

mod channel;
mod charset;
mod config;
mod cursor;
mod driver;
mod error;
mod rules;
mod scanner;
mod state;
mod table;
mod token;

pub use channel::{token_channel, CancelToken, Disconnected, TokenReceiver, TokenSender, TokenSink};
pub use charset::{CharClass, CharSet};
pub use config::{ContractPolicy, ScanConfig, DEFAULT_CHANNEL_CAPACITY};
pub use cursor::{Cursor, Rune};
pub use driver::{Driver, Halt, ScanPosition, ScanProgress, Step};
pub use error::{ContractViolation, PullError, RuleError, ScanError};
pub use rules::{Pattern, Rule, RuleTable, RuleTableBuilder};
pub use scanner::{Scanner, ScannerBuilder, Stepper};
pub use state::{ScanContext, StateFn};
pub use table::TABLE;
pub use token::{Token, TokenKind};
