use super::*;
use crate::charset::CharClass;

fn cursor(source: &str) -> Cursor {
    Cursor::new(source).expect("test source fits in u32")
}

// === Construction ===

#[test]
fn new_cursor_starts_at_zero() {
    let cur = cursor("AO53");
    assert_eq!(cur.input(), "AO53");
    assert_eq!(cur.start(), 0);
    assert_eq!(cur.pos(), 0);
    assert_eq!(cur.len(), 4);
    assert_eq!(cur.last_rune(), None);
}

#[test]
fn starting_at_offset() {
    let cur = Cursor::starting_at("AO53", 2).expect("offset is in bounds");
    assert_eq!(cur.start(), 2);
    assert_eq!(cur.pos(), 2);
    assert_eq!(cur.peek(), Some('5'));
}

#[test]
fn starting_at_end_is_eof() {
    let cur = Cursor::starting_at("ab", 2).expect("end offset is valid");
    assert!(cur.is_eof());
}

#[test]
fn starting_past_end_is_rejected() {
    let err = Cursor::starting_at("ab", 3).expect_err("offset past end");
    assert!(matches!(err, ScanError::StartOutOfBounds { offset: 3, len: 2 }));
}

#[test]
fn starting_inside_char_is_rejected() {
    let err = Cursor::starting_at("é", 1).expect_err("offset splits 'é'");
    assert!(matches!(err, ScanError::StartNotCharBoundary { offset: 1 }));
}

// === next ===

#[test]
fn next_walks_every_char() {
    let mut cur = cursor("AO53");
    for expected in "AO53".chars() {
        assert_eq!(cur.next(), Some(expected));
    }
    assert_eq!(cur.next(), None);
    assert!(cur.is_eof());
}

#[test]
fn next_at_eof_does_not_advance() {
    let mut cur = cursor("a");
    cur.next();
    assert_eq!(cur.next(), None);
    assert_eq!(cur.next(), None);
    assert_eq!(cur.pos(), 1);
}

#[test]
fn next_on_empty_input() {
    let mut cur = cursor("");
    assert!(cur.is_eof());
    assert_eq!(cur.next(), None);
    assert_eq!(cur.pos(), 0);
}

#[test]
fn next_records_rune_width() {
    let mut cur = cursor("a\u{1F600}é");
    cur.next();
    assert_eq!(cur.last_rune(), Some(Rune { ch: 'a', width: 1 }));
    cur.next();
    assert_eq!(
        cur.last_rune(),
        Some(Rune {
            ch: '\u{1F600}',
            width: 4
        })
    );
    assert_eq!(cur.pos(), 5);
    cur.next();
    assert_eq!(cur.last_rune(), Some(Rune { ch: 'é', width: 2 }));
    assert_eq!(cur.pos(), 7);
}

// === peek ===

#[test]
fn peek_returns_first_char() {
    let cur = cursor("AO53");
    assert_eq!(cur.peek(), Some('A'));
}

#[test]
fn peek_is_idempotent() {
    let cur = cursor("AO53");
    assert_eq!(cur.peek(), Some('A'));
    assert_eq!(cur.peek(), Some('A'));
    assert_eq!(cur.pos(), 0);
}

#[test]
fn peek_matches_next() {
    let mut cur = cursor("AO53");
    for _ in 0..4 {
        let peeked = cur.peek();
        assert_eq!(peeked, cur.next());
    }
    assert_eq!(cur.peek(), None);
}

#[test]
fn peek_keeps_lookahead_slot() {
    let mut cur = cursor("ab");
    cur.next();
    cur.peek();
    cur.backward().expect("slot still holds 'a'");
    assert_eq!(cur.pos(), 0);
}

// === backward ===

#[test]
fn backward_unreads_last_char() {
    let mut cur = cursor("é!");
    cur.next();
    cur.backward().expect("one un-read is allowed");
    assert_eq!(cur.pos(), 0);
    assert_eq!(cur.next(), Some('é'));
}

#[test]
fn double_backward_is_reported_and_ignored() {
    let mut cur = cursor("abc");
    cur.next();
    cur.next();
    cur.backward().expect("first un-read is allowed");
    let err = cur.backward().expect_err("second un-read has nothing to undo");
    assert_eq!(err, ContractViolation::BackwardWithoutNext { pos: 1 });
    assert_eq!(cur.pos(), 1);
}

#[test]
fn backward_on_fresh_cursor_is_reported() {
    let mut cur = cursor("abc");
    assert!(cur.backward().is_err());
    assert_eq!(cur.pos(), 0);
}

#[test]
fn backward_after_eof_is_reported() {
    let mut cur = cursor("a");
    cur.next();
    cur.next();
    assert!(cur.backward().is_err());
    assert_eq!(cur.pos(), 1);
}

#[test]
fn backward_after_ignore_is_reported() {
    let mut cur = cursor("ab");
    cur.next();
    cur.ignore();
    assert!(cur.backward().is_err());
    assert_eq!(cur.start(), 1);
    assert_eq!(cur.pos(), 1);
}

// === accept ===

#[test]
fn accept_every_member() {
    let mut cur = cursor("AO53");
    for _ in 0..4 {
        assert!(cur.accept("53AO"));
    }
    assert!(!cur.accept("53AO"));
    assert_eq!(cur.window(), "AO53");
}

#[test]
fn accept_miss_leaves_position() {
    let mut cur = cursor("xyz");
    assert!(!cur.accept("abc"));
    assert_eq!(cur.pos(), 0);
    assert_eq!(cur.peek(), Some('x'));
}

#[test]
fn accept_single_char() {
    let mut cur = cursor("AAB");
    assert!(cur.accept(&'A'));
    assert!(cur.accept(&'A'));
    assert!(!cur.accept(&'A'));
    assert_eq!(cur.pos(), 2);
}

#[test]
fn accept_class() {
    let mut cur = cursor("7x");
    assert!(cur.accept(&CharClass::ascii_digit()));
    assert!(!cur.accept(&CharClass::ascii_digit()));
    assert_eq!(cur.pos(), 1);
}

#[test]
fn successful_accept_can_be_unread() {
    let mut cur = cursor("ab");
    assert!(cur.accept("a"));
    cur.backward().expect("accepted char is in the slot");
    assert_eq!(cur.pos(), 0);
}

// === accept_run ===

#[test]
fn accept_run_is_greedy() {
    let mut cur = cursor("AAAB");
    assert_eq!(cur.accept_run(&'A'), 3);
    assert_eq!(cur.window(), "AAA");
    assert_eq!(cur.peek(), Some('B'));
}

#[test]
fn accept_run_without_match_is_noop() {
    let mut cur = cursor("BAA");
    assert_eq!(cur.accept_run(&'A'), 0);
    assert_eq!(cur.pos(), 0);
    assert_eq!(cur.start(), 0);
}

#[test]
fn accept_run_hex_digits() {
    let mut cur = cursor("dead beef");
    assert_eq!(cur.accept_run(&CharClass::ascii_hex_digit()), 4);
    assert_eq!(cur.window(), "dead");
}

#[test]
fn accept_run_to_eof() {
    let mut cur = cursor("aaa");
    assert_eq!(cur.accept_run(&'a'), 3);
    assert!(cur.is_eof());
}

// === accept_exactly ===

#[test]
fn accept_exactly_all_or_nothing() {
    let mut cur = cursor("5AO");
    assert!(!cur.accept_exactly(&CharClass::ascii_hex_digit(), 3));
    assert_eq!(cur.pos(), 0);
    assert!(cur.accept_exactly(&CharClass::ascii_hex_digit(), 2));
    assert_eq!(cur.window(), "5A");
}

#[test]
fn accept_exactly_stops_at_eof() {
    let mut cur = cursor("a");
    assert!(!cur.accept_exactly(&'a', 2));
    assert_eq!(cur.pos(), 0);
}

// === accept_literal ===

#[test]
fn accept_literal_crlf() {
    let mut cur = cursor("\r\nA");
    assert!(cur.accept_literal("\r\n"));
    assert_eq!(cur.window(), "\r\n");
    assert!(!cur.accept_literal("\r\n"));
    assert_eq!(cur.pos(), 2);
}

#[test]
fn accept_literal_partial_prefix_misses() {
    let mut cur = cursor("\rA");
    assert!(!cur.accept_literal("\r\n"));
    assert_eq!(cur.pos(), 0);
}

#[test]
fn accept_empty_literal_misses() {
    let mut cur = cursor("abc");
    assert!(!cur.accept_literal(""));
    assert_eq!(cur.pos(), 0);
}

// === window / ignore / take_token ===

#[test]
fn take_token_on_empty_window() {
    let mut cur = cursor("AO53");
    let tok = cur.take_token(TokenKind::Octet);
    assert_eq!(tok, Token::new(TokenKind::Octet, "", 0));
}

#[test]
fn take_token_captures_first_char() {
    let mut cur = cursor("AO53");
    cur.next();
    let tok = cur.take_token(TokenKind::Octet);
    assert_eq!(tok, Token::new(TokenKind::Octet, "A", 0));
    assert_eq!(cur.start(), 1);
}

#[test]
fn take_token_per_char() {
    let mut cur = cursor("AO53");
    for (offset, c) in "AO53".char_indices() {
        cur.next();
        let tok = cur.take_token(TokenKind::Octet);
        assert_eq!(tok.text(), c.to_string());
        assert_eq!(tok.offset() as usize, offset);
    }
}

#[test]
fn take_token_spanning_chars() {
    let mut cur = cursor("AO53");
    cur.next();
    cur.next();
    assert_eq!(cur.take_token(TokenKind::Octet).text(), "AO");
}

#[test]
fn ignore_discards_window() {
    let mut cur = cursor("  x");
    cur.accept_run(&' ');
    cur.ignore();
    assert_eq!(cur.window(), "");
    cur.next();
    let tok = cur.take_token(TokenKind::Alpha);
    assert_eq!(tok.text(), "x");
    assert_eq!(tok.offset(), 2);
}

#[test]
fn take_error_keeps_window() {
    let mut cur = cursor("A$B");
    cur.next();
    cur.next();
    let tok = cur.take_error("bad");
    assert_eq!(tok.text(), "A$");
    assert_eq!(tok.message(), Some("bad"));
    assert_eq!(cur.start(), 2);
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_cursor {
    use super::super::Cursor;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn peek_twice_is_stable(source in "\\PC{0,32}", steps in 0usize..40) {
            let mut cur = Cursor::new(source.as_str()).expect("small input");
            for _ in 0..steps {
                cur.next();
            }
            let pos = cur.pos();
            let first = cur.peek();
            prop_assert_eq!(first, cur.peek());
            prop_assert_eq!(pos, cur.pos());
        }

        #[test]
        fn next_then_backward_restores(source in "\\PC{1,32}", steps in 0usize..32) {
            let mut cur = Cursor::new(source.as_str()).expect("small input");
            for _ in 0..steps {
                cur.next();
            }
            let pos = cur.pos();
            if cur.next().is_some() {
                prop_assert!(cur.backward().is_ok());
                prop_assert_eq!(pos, cur.pos());
            }
        }

        #[test]
        fn windows_partition_input(source in "\\PC{0,32}", cuts in proptest::collection::vec(1u32..4, 0..16)) {
            let mut cur = Cursor::new(source.as_str()).expect("small input");
            let mut rebuilt = String::new();
            for n in cuts {
                for _ in 0..n {
                    cur.next();
                }
                rebuilt.push_str(cur.take_token(crate::TokenKind::Unclassified).text());
            }
            while cur.next().is_some() {}
            rebuilt.push_str(cur.window());
            prop_assert_eq!(rebuilt, source);
        }
    }
}
