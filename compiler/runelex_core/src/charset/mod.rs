//! Character sets accepted by the cursor.

/// Membership test for one code point.
///
/// Implemented for a single `char`, for `str` (any character of the string,
/// so `"0123456789"` is the set of decimal digits), and for [`CharClass`].
pub trait CharSet {
    fn contains(&self, c: char) -> bool;
}

impl CharSet for char {
    #[inline]
    fn contains(&self, c: char) -> bool {
        *self == c
    }
}

impl CharSet for str {
    #[inline]
    fn contains(&self, c: char) -> bool {
        self.chars().any(|member| member == c)
    }
}

/// A character class as declared in a rule table.
#[derive(Clone, Debug)]
pub enum CharClass {
    /// Exactly the characters of the string.
    Chars(Box<str>),
    /// An inclusive range `lo..=hi`.
    Range(char, char),
    /// Any code point the predicate accepts.
    Predicate(fn(char) -> bool),
    /// Any code point one of the members accepts.
    Union(Vec<CharClass>),
}

impl CharClass {
    pub fn chars(chars: &str) -> Self {
        CharClass::Chars(chars.into())
    }

    pub fn range(lo: char, hi: char) -> Self {
        CharClass::Range(lo, hi)
    }

    pub fn predicate(pred: fn(char) -> bool) -> Self {
        CharClass::Predicate(pred)
    }

    pub fn union(members: impl IntoIterator<Item = CharClass>) -> Self {
        CharClass::Union(members.into_iter().collect())
    }

    /// `[A-Za-z]`
    pub fn ascii_alpha() -> Self {
        Self::union([Self::range('A', 'Z'), Self::range('a', 'z')])
    }

    /// `[0-9]`
    pub fn ascii_digit() -> Self {
        Self::range('0', '9')
    }

    /// `[0-9A-Fa-f]`
    pub fn ascii_hex_digit() -> Self {
        Self::union([
            Self::range('0', '9'),
            Self::range('A', 'F'),
            Self::range('a', 'f'),
        ])
    }

    /// Returns `true` if the class provably matches nothing.
    ///
    /// Predicates are opaque and never count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CharClass::Chars(chars) => chars.is_empty(),
            CharClass::Range(lo, hi) => lo > hi,
            CharClass::Predicate(_) => false,
            CharClass::Union(members) => members.iter().all(CharClass::is_empty),
        }
    }
}

impl CharSet for CharClass {
    fn contains(&self, c: char) -> bool {
        match self {
            CharClass::Chars(chars) => CharSet::contains(&**chars, c),
            CharClass::Range(lo, hi) => (*lo..=*hi).contains(&c),
            CharClass::Predicate(pred) => pred(c),
            CharClass::Union(members) => members.iter().any(|member| member.contains(c)),
        }
    }
}

#[cfg(test)]
mod tests;
