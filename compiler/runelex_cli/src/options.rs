//! Command-line options of `runelex lex`.

use std::fmt;

use runelex_core::{ContractPolicy, ScanConfig};

/// Grammar selected with `--grammar=<name>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grammar {
    /// HTTP/1.0 terminal table with the table-driven state.
    #[default]
    Http,
    /// Alternating `A`/`B` run collectors.
    Runs,
    /// Two hex digits per octet.
    Octet,
    /// Greedy hex digit runs.
    Hex,
    /// The trivial grammar.
    Empty,
    /// The whole-string regex tokenizer over the HTTP terminals.
    Regex,
}

impl Grammar {
    pub const ALL: [Grammar; 6] = [
        Grammar::Http,
        Grammar::Runs,
        Grammar::Octet,
        Grammar::Hex,
        Grammar::Empty,
        Grammar::Regex,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|grammar| grammar.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Grammar::Http => "http",
            Grammar::Runs => "runs",
            Grammar::Octet => "octet",
            Grammar::Hex => "hex",
            Grammar::Empty => "empty",
            Grammar::Regex => "regex",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Grammar::Http => "CRLF, ALPHA and DIGIT runs via the rule table",
            Grammar::Runs => "alternating runs of A and B",
            Grammar::Octet => "two hex digits per octet",
            Grammar::Hex => "greedy runs of hex digits",
            Grammar::Empty => "Eof on empty input, nothing otherwise",
            Grammar::Regex => "one regex alternation over CRLF and single letters",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsed `runelex lex` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOptions {
    /// Input file, or `-` for stdin.
    pub path: String,
    pub grammar: Grammar,
    /// Drive the scan one transition at a time and print each step.
    pub step: bool,
    /// Byte offset to start scanning at.
    pub start_at: u32,
    pub config: ScanConfig,
}

impl LexOptions {
    pub fn reads_stdin(&self) -> bool {
        self.path == "-"
    }
}

/// Parse the arguments following `runelex lex`.
pub fn parse_lex_options(args: &[String]) -> Result<LexOptions, String> {
    let mut path = None;
    let mut grammar = Grammar::default();
    let mut step = false;
    let mut start_at = 0;
    let mut config = ScanConfig::default();

    for arg in args {
        if let Some(name) = arg.strip_prefix("--grammar=") {
            grammar = Grammar::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = Grammar::ALL.iter().map(|g| g.name()).collect();
                format!("unknown grammar '{name}', options: {}", known.join(", "))
            })?;
        } else if arg == "--step" {
            step = true;
        } else if let Some(value) = arg.strip_prefix("--capacity=") {
            config.channel_capacity = parse_number(value, "--capacity")?;
        } else if let Some(value) = arg.strip_prefix("--from=") {
            start_at = parse_number(value, "--from")?;
        } else if let Some(value) = arg.strip_prefix("--max-steps=") {
            config.max_steps = Some(parse_number(value, "--max-steps")?);
        } else if arg == "--strict" {
            config.contract_policy = ContractPolicy::Panic;
        } else if arg == "--no-progress-check" {
            config.check_progress = false;
        } else if arg == "-" || !arg.starts_with('-') {
            if path.is_some() {
                return Err(format!("unexpected argument '{arg}'"));
            }
            path = Some(arg.clone());
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| "missing input path".to_string())?;
    Ok(LexOptions {
        path,
        grammar,
        step,
        start_at,
        config,
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} expects a non-negative integer, got '{value}'"))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
