//! State-function grammars.
//!
//! | state     | emits                                   | stops on                 |
//! |-----------|-----------------------------------------|--------------------------|
//! | `EMPTY`   | any pending window as `Unclassified`    | the first character      |
//! | `RUN_A`   | a run of `A` as `Run`, then `RUN_B`     | a character that is not `A` |
//! | `RUN_B`   | a run of `B` as `Run`, then `RUN_A`     | a character that is not `B` |
//! | `OCTET`   | two hex digits as `Octet`               | anything else            |
//! | `HEX_RUN` | a run of hex digits as `Octet`          | a non-hex character      |
//!
//! Every state emits `Eof` when it finds the input exhausted. Stopping on a
//! character emits nothing: the consumer sees the channel close without an
//! `Eof` token.

use std::sync::Arc;

use runelex_core::{CharClass, RuleError, RuleTable, ScanContext, StateFn, TokenKind};

/// Hex digits per `Octet` token.
const OCTET_DIGITS: u32 = 2;

pub const EMPTY: StateFn = StateFn::new("empty", empty);
pub const RUN_A: StateFn = StateFn::new("run_a", run_a);
pub const RUN_B: StateFn = StateFn::new("run_b", run_b);
pub const OCTET: StateFn = StateFn::new("octet", octet);
pub const HEX_RUN: StateFn = StateFn::new("hex_run", hex_run);

/// The HTTP/1.0 terminal table: `CRLF`, `ALPHA` and `DIGIT`.
///
/// Scanned with [`TABLE`](runelex_core::TABLE), letters and digits are
/// collected into runs.
pub fn http_rules() -> Result<Arc<RuleTable>, RuleError> {
    let table = RuleTable::builder()
        .literal("CRLF", TokenKind::Crlf, "\r\n")
        .class("ALPHA", TokenKind::Alpha, CharClass::ascii_alpha())
        .class("DIGIT", TokenKind::Digit, CharClass::ascii_digit())
        .build()?;
    Ok(Arc::new(table))
}

fn empty(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    if cx.pos() > cx.start() {
        cx.emit(TokenKind::Unclassified);
        return Some(EMPTY);
    }
    eof_or_stop(cx)
}

fn run_a(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    collect_run(cx, 'A', RUN_B)
}

fn run_b(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    collect_run(cx, 'B', RUN_A)
}

fn collect_run(cx: &mut ScanContext<'_>, member: char, then: StateFn) -> Option<StateFn> {
    if cx.accept_run(&member) > 0 {
        cx.emit(TokenKind::Run);
        return Some(then);
    }
    eof_or_stop(cx)
}

fn octet(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    if cx.accept_exactly(&CharClass::ascii_hex_digit(), OCTET_DIGITS) {
        cx.emit(TokenKind::Octet);
        return Some(OCTET);
    }
    eof_or_stop(cx)
}

fn hex_run(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    if cx.accept_run(&CharClass::ascii_hex_digit()) > 0 {
        cx.emit(TokenKind::Octet);
        return Some(HEX_RUN);
    }
    eof_or_stop(cx)
}

fn eof_or_stop(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    if cx.at_eof() {
        cx.emit(TokenKind::Eof);
    }
    None
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
