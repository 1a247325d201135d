//! Rule tables: named terminals mapped to patterns.
//!
//! A table is built once, then shared read-only (behind an `Arc`) with every
//! driver that scans with it. Rules keep their declaration order; lookups by
//! name go through a hash index.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::charset::{CharClass, CharSet};
use crate::error::RuleError;
use crate::token::TokenKind;

/// What a rule matches at the scan head.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// A non-empty greedy run of the class.
    Class(CharClass),
    /// Exactly this string.
    Literal(Box<str>),
}

impl Pattern {
    /// Byte length of the longest prefix of `rest` this pattern matches.
    ///
    /// Zero means no match.
    pub fn match_len(&self, rest: &str) -> usize {
        match self {
            Pattern::Class(class) => rest
                .chars()
                .take_while(|&c| class.contains(c))
                .map(char::len_utf8)
                .sum(),
            Pattern::Literal(literal) => {
                if rest.starts_with(&**literal) {
                    literal.len()
                } else {
                    0
                }
            }
        }
    }
}

/// A named terminal.
#[derive(Clone, Debug)]
pub struct Rule {
    name: Box<str>,
    kind: TokenKind,
    pattern: Pattern,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the tokens this rule produces.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Immutable, ordered set of rules.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    by_name: FxHashMap<Box<str>, usize>,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// A table with no rules. The table-driven state scans only the empty
    /// input with it.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.by_name.get(name).map(|&index| &self.rules[index])
    }

    /// Character class of the rule `name`, if it is a class rule.
    pub fn class(&self, name: &str) -> Option<&CharClass> {
        match self.get(name)?.pattern() {
            Pattern::Class(class) => Some(class),
            Pattern::Literal(_) => None,
        }
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Longest rule match at the start of `rest`.
    ///
    /// Ties go to the rule declared first. Returns the rule and the byte
    /// length of the match, or `None` if no rule matches.
    pub fn longest_match(&self, rest: &str) -> Option<(&Rule, usize)> {
        let mut best: Option<(&Rule, usize)> = None;
        for rule in &self.rules {
            let len = rule.pattern.match_len(rest);
            let longer = match best {
                Some((_, best_len)) => len > best_len,
                None => len > 0,
            };
            if longer {
                best = Some((rule, len));
            }
        }
        best
    }
}

/// Collects rule declarations; the first invalid one is reported by
/// [`build()`](Self::build).
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<Rule>,
    by_name: FxHashMap<Box<str>, usize>,
    error: Option<RuleError>,
}

impl RuleTableBuilder {
    /// Declare a rule matching a non-empty run of `class`.
    #[must_use]
    pub fn class(self, name: &str, kind: TokenKind, class: CharClass) -> Self {
        if class.is_empty() {
            return self.fail(RuleError::EmptyClass(name.to_owned()));
        }
        self.push(name, kind, Pattern::Class(class))
    }

    /// Declare a rule matching exactly `literal`.
    #[must_use]
    pub fn literal(self, name: &str, kind: TokenKind, literal: &str) -> Self {
        if literal.is_empty() {
            return self.fail(RuleError::EmptyLiteral(name.to_owned()));
        }
        self.push(name, kind, Pattern::Literal(literal.into()))
    }

    pub fn build(self) -> Result<RuleTable, RuleError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(RuleTable {
                rules: self.rules,
                by_name: self.by_name,
            }),
        }
    }

    fn push(mut self, name: &str, kind: TokenKind, pattern: Pattern) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.by_name.contains_key(name) {
            return self.fail(RuleError::Duplicate(name.to_owned()));
        }
        self.by_name.insert(name.into(), self.rules.len());
        self.rules.push(Rule {
            name: name.into(),
            kind,
            pattern,
        });
        self
    }

    fn fail(mut self, error: RuleError) -> Self {
        self.error.get_or_insert(error);
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
