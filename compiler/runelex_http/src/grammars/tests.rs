use super::*;
use pretty_assertions::assert_eq;
use runelex_core::{Halt, Scanner, Token, TABLE};

fn scan_from(input: &str, offset: u32, initial: StateFn) -> Vec<Token> {
    let mut stepper = Scanner::builder("test", input)
        .rules(http_rules().expect("http rules are valid"))
        .start_at(offset)
        .stepper(initial)
        .expect("stepper builds");
    assert_eq!(stepper.run(), Halt::Finished);
    stepper.drain().collect()
}

fn scan(input: &str, initial: StateFn) -> Vec<Token> {
    scan_from(input, 0, initial)
}

fn eof(offset: u32) -> Token {
    Token::new(TokenKind::Eof, "", offset)
}

// === EMPTY ===

#[test]
fn empty_state_on_empty_input() {
    assert_eq!(scan("", EMPTY), vec![eof(0)]);
}

#[test]
fn empty_state_stops_on_first_char() {
    assert!(scan("GET", EMPTY).is_empty());
}

#[test]
fn empty_state_at_end_offset() {
    assert_eq!(scan_from("GET", 3, EMPTY), vec![eof(3)]);
}

// === RUN_A / RUN_B ===

#[test]
fn alternating_runs() {
    let tokens = scan("ABABA", RUN_A);
    let texts: Vec<&str> = tokens.iter().map(Token::text).collect();
    assert_eq!(texts, ["A", "B", "A", "B", "A", ""]);
    assert!(tokens[..5].iter().all(|t| t.kind() == TokenKind::Run));
    assert_eq!(tokens[5], eof(5));
}

#[test]
fn runs_are_greedy() {
    let tokens = scan("AAABBA", RUN_A);
    let texts: Vec<&str> = tokens.iter().map(Token::text).collect();
    assert_eq!(texts, ["AAA", "BB", "A", ""]);
}

#[test]
fn run_stops_on_foreign_char() {
    let tokens = scan("ABC", RUN_A);
    let texts: Vec<&str> = tokens.iter().map(Token::text).collect();
    assert_eq!(texts, ["A", "B"]);
}

#[test]
fn run_b_first() {
    assert!(scan("A", RUN_B).is_empty());
    assert_eq!(scan("BA", RUN_B).len(), 3);
}

// === OCTET / HEX_RUN ===

#[test]
fn octet_from_start_of_ao53_emits_nothing() {
    assert!(scan("AO53", OCTET).is_empty());
}

#[test]
fn octet_from_offset_two() {
    assert_eq!(
        scan_from("AO53", 2, OCTET),
        vec![Token::new(TokenKind::Octet, "53", 2), eof(4)]
    );
}

#[test]
fn octets_are_two_digits_each() {
    let tokens = scan("deadBEEF", OCTET);
    let texts: Vec<&str> = tokens.iter().map(Token::text).collect();
    assert_eq!(texts, ["de", "ad", "BE", "EF", ""]);
}

#[test]
fn odd_digit_count_stops_before_last() {
    let tokens = scan("abc", OCTET);
    assert_eq!(tokens, vec![Token::new(TokenKind::Octet, "ab", 0)]);
}

#[test]
fn hex_run_collects_all_digits() {
    assert_eq!(
        scan("c0ffee", HEX_RUN),
        vec![Token::new(TokenKind::Octet, "c0ffee", 0), eof(6)]
    );
}

#[test]
fn hex_run_stops_on_non_hex() {
    assert_eq!(
        scan("AO53", HEX_RUN),
        vec![Token::new(TokenKind::Octet, "A", 0)]
    );
}

// === http_rules ===

#[test]
fn http_rules_declare_three_terminals() {
    let rules = http_rules().expect("http rules are valid");
    let names: Vec<&str> = rules.iter().map(|rule| rule.name()).collect();
    assert_eq!(names, ["CRLF", "ALPHA", "DIGIT"]);
}

#[test]
fn http_rules_with_table_state() {
    let tokens = scan("GET\r\n10", TABLE);
    let summary: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind(), t.text())).collect();
    assert_eq!(
        summary,
        [
            (TokenKind::Alpha, "GET"),
            (TokenKind::Crlf, "\r\n"),
            (TokenKind::Digit, "10"),
            (TokenKind::Eof, ""),
        ]
    );
}
