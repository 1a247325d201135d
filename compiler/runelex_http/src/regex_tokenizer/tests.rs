use super::*;
use pretty_assertions::assert_eq;

fn http() -> RegexTokenizer {
    RegexTokenizer::http().expect("http terminals compile")
}

fn collect(tokenizer: &RegexTokenizer, input: &str) -> Vec<Result<Token, RegexTokenizerError>> {
    tokenizer.tokenize(input).collect()
}

// === Construction ===

#[test]
fn alternation_uses_named_groups_in_order() {
    assert_eq!(http().as_str(), r"(?P<t0>\r\n)|(?P<t1>[A-Za-z])");
}

#[test]
fn no_terminals_is_rejected() {
    let err = RegexTokenizer::new(&[]).expect_err("empty terminal list");
    assert_eq!(err, RegexTokenizerError::NoTerminals);
}

#[test]
fn invalid_pattern_names_its_kind() {
    let err = RegexTokenizer::new(&[(TokenKind::Alpha, "[a-"), (TokenKind::Digit, "[0-9]")])
        .expect_err("unclosed class");
    assert!(matches!(
        err,
        RegexTokenizerError::InvalidPattern {
            kind: TokenKind::Alpha,
            ..
        }
    ));
}

#[test]
fn empty_matching_pattern_is_rejected() {
    let err = RegexTokenizer::new(&[(TokenKind::Digit, "[0-9]*")]).expect_err("matches \"\"");
    assert_eq!(err, RegexTokenizerError::EmptyMatch { kind: TokenKind::Digit });
}

// === Tokenize ===

#[test]
fn crlf_then_letters() {
    let tokens = collect(&http(), "\r\nAb");
    assert_eq!(
        tokens,
        vec![
            Ok(Token::new(TokenKind::Crlf, "\r\n", 0)),
            Ok(Token::new(TokenKind::Alpha, "A", 2)),
            Ok(Token::new(TokenKind::Alpha, "b", 3)),
        ]
    );
}

#[test]
fn empty_input_yields_nothing() {
    assert!(collect(&http(), "").is_empty());
}

#[test]
fn unmatched_char_stops_iteration() {
    let tokens = collect(&http(), "A$B");
    assert_eq!(
        tokens,
        vec![
            Ok(Token::new(TokenKind::Alpha, "A", 0)),
            Err(RegexTokenizerError::Unmatched { offset: 1 }),
        ]
    );
}

#[test]
fn bare_cr_is_unmatched() {
    let tokens = collect(&http(), "\rA");
    assert_eq!(tokens, vec![Err(RegexTokenizerError::Unmatched { offset: 0 })]);
}

#[test]
fn first_declared_terminal_wins_ties() {
    let tokenizer = RegexTokenizer::new(&[
        (TokenKind::Octet, "[0-9a-f]{2}"),
        (TokenKind::Digit, "[0-9]+"),
    ])
    .expect("terminals compile");
    let kinds: Vec<TokenKind> = tokenizer
        .tokenize("4242")
        .map(|token| token.map(|t| t.kind()))
        .collect::<Result<_, _>>()
        .expect("input is covered");
    assert_eq!(kinds, [TokenKind::Octet, TokenKind::Octet]);
}

#[test]
fn multibyte_offsets_are_bytes() {
    let tokenizer = RegexTokenizer::new(&[
        (TokenKind::Unclassified, r"\p{Greek}+"),
        (TokenKind::Alpha, "[a-z]+"),
    ])
    .expect("terminals compile");
    let tokens = collect(&tokenizer, "λογοςab");
    assert_eq!(tokens[1], Ok(Token::new(TokenKind::Alpha, "ab", 10)));
}
