//! Generic table-driven grammar.
//!
//! [`TABLE`] tokenizes with whatever [`RuleTable`](crate::RuleTable) the
//! scanner was built with: one longest-match token per transition, an Error
//! token on the first character no rule covers, Eof at the end.

use crate::state::{ScanContext, StateFn};
use crate::token::TokenKind;

pub const TABLE: StateFn = StateFn::new("table", table);

fn table(cx: &mut ScanContext<'_>) -> Option<StateFn> {
    if cx.at_eof() {
        cx.emit(TokenKind::Eof);
        return None;
    }
    match cx.accept_longest_rule() {
        Some(kind) => {
            cx.emit(kind);
            Some(TABLE)
        }
        None => {
            let message = match cx.peek() {
                Some(c) => format!("no rule matches {c:?} at offset {}", cx.pos()),
                None => format!("no rule matches at offset {}", cx.pos()),
            };
            cx.emit_error(message);
            None
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;

    use super::TABLE;
    use crate::charset::CharClass;
    use crate::cursor::Cursor;
    use crate::driver::{Driver, Halt};
    use crate::rules::RuleTable;
    use crate::token::{Token, TokenKind};

    fn scan(source: &str, rules: RuleTable) -> (Vec<Token>, Halt) {
        let cursor = Cursor::new(source).expect("small input");
        let mut driver = Driver::new("table", cursor, rules.into(), TABLE);
        let mut sink: VecDeque<Token> = VecDeque::new();
        let halt = driver.run(&mut sink);
        (sink.into(), halt)
    }

    fn alpha_only() -> RuleTable {
        RuleTable::builder()
            .class("ALPHA", TokenKind::Alpha, CharClass::ascii_alpha())
            .build()
            .expect("rules are valid")
    }

    #[test]
    fn empty_input_yields_only_eof() {
        let (tokens, halt) = scan("", RuleTable::default());
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", 0)]);
        assert_eq!(halt, Halt::Finished);
    }

    #[test]
    fn unmatched_char_is_an_error_at_its_offset() {
        let (tokens, halt) = scan("A$B", alpha_only());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new(TokenKind::Alpha, "A", 0));
        assert_eq!(tokens[1].kind(), TokenKind::Error);
        assert_eq!(tokens[1].offset(), 1);
        assert_eq!(tokens[1].text(), "$");
        assert_eq!(tokens[1].message(), Some("no rule matches '$' at offset 1"));
        assert_eq!(halt, Halt::Finished);
    }

    #[test]
    fn class_rules_are_greedy() {
        let (tokens, _) = scan("Host", alpha_only());
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Alpha, "Host", 0),
                Token::new(TokenKind::Eof, "", 4),
            ]
        );
    }
}
