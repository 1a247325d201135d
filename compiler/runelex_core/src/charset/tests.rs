use super::*;

#[test]
fn single_char_set() {
    assert!(CharSet::contains(&'A', 'A'));
    assert!(!CharSet::contains(&'A', 'a'));
}

#[test]
fn str_set_is_any_member() {
    let set = "53AO";
    for c in "53AO".chars() {
        assert!(CharSet::contains(set, c), "{c:?} should be a member");
    }
    assert!(!CharSet::contains(set, 'B'));
    assert!(!CharSet::contains("", 'a'));
}

#[test]
fn range_is_inclusive() {
    let digits = CharClass::ascii_digit();
    assert!(digits.contains('0'));
    assert!(digits.contains('9'));
    assert!(!digits.contains('a'));
}

#[test]
fn ascii_alpha_covers_both_cases() {
    let alpha = CharClass::ascii_alpha();
    assert!(alpha.contains('a'));
    assert!(alpha.contains('Z'));
    assert!(!alpha.contains('$'));
    assert!(!alpha.contains('é'));
}

#[test]
fn hex_digits() {
    let hex = CharClass::ascii_hex_digit();
    for c in "0123456789abcdefABCDEF".chars() {
        assert!(hex.contains(c), "{c:?} is a hex digit");
    }
    assert!(!hex.contains('O'));
    assert!(!hex.contains('g'));
}

#[test]
fn union_of_classes() {
    let class = CharClass::union([CharClass::chars("_-"), CharClass::ascii_digit()]);
    assert!(class.contains('_'));
    assert!(class.contains('7'));
    assert!(!class.contains('x'));
}

#[test]
fn multibyte_members() {
    let class = CharClass::chars("äö\u{1F600}");
    assert!(class.contains('ö'));
    assert!(class.contains('\u{1F600}'));
    assert!(!class.contains('o'));
}

#[test]
fn emptiness() {
    assert!(CharClass::chars("").is_empty());
    assert!(CharClass::range('z', 'a').is_empty());
    assert!(CharClass::union([]).is_empty());
    assert!(CharClass::union([CharClass::chars(""), CharClass::range('9', '0')]).is_empty());
    assert!(!CharClass::range('a', 'a').is_empty());
    assert!(!CharClass::predicate(|_| false).is_empty());
}

#[test]
fn hex_digit_class_is_inspectable() {
    let hex = CharClass::ascii_hex_digit();
    assert!(!hex.is_empty());
    assert!(matches!(&hex, CharClass::Union(members) if members.len() == 3));
    assert_eq!(
        format!("{hex:?}"),
        "Union([Range('0', '9'), Range('A', 'F'), Range('a', 'f')])"
    );
}
