//! HTTP/1.0 front ends for the runelex engine.
//!
//! Two independent tokenizers over the same terminal set:
//!
//! - [`grammars`]: state functions for the streaming engine, plus the
//!   [`http_rules()`] table the generic [`TABLE`](runelex_core::TABLE) state
//!   scans with;
//! - [`regex_tokenizer`]: a whole-string tokenizer that compiles the
//!   terminals into a single regex alternation.
//!
//! The two are not required to agree; the regex tokenizer matches one
//! character per `ALPHA` token, the table grammar collects runs.

pub mod grammars;
pub mod regex_tokenizer;

pub use grammars::{http_rules, EMPTY, HEX_RUN, OCTET, RUN_A, RUN_B};
pub use regex_tokenizer::{RegexTokenizer, RegexTokenizerError, RegexTokens};
