//! Command implementations.

use std::io::{self, Write};
use std::sync::Arc;

use runelex_core::{Halt, RuleTable, Scanner, StateFn, Step, Token, TABLE};
use runelex_http::{http_rules, RegexTokenizer, EMPTY, HEX_RUN, OCTET, RUN_A};
use tracing::debug;

use crate::options::{Grammar, LexOptions};

/// What a `lex` run produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexReport {
    pub tokens: usize,
    pub errors: usize,
    /// Why the scan stopped; `None` for the regex tokenizer.
    pub halt: Option<Halt>,
}

impl LexReport {
    pub fn failed(&self) -> bool {
        self.errors > 0 || matches!(self.halt, Some(Halt::Violation(_)))
    }
}

/// `runelex lex`: tokenize a file or stdin and print one token per line.
pub fn lex_file(options: &LexOptions) {
    let input = read_input(options);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match lex_source(options, &input, &mut out) {
        Ok(report) => {
            if let Some(halt) = report.halt.filter(|halt| *halt != Halt::Finished) {
                eprintln!("scan stopped: {halt:?}");
            }
            if report.failed() {
                std::process::exit(1);
            }
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// `runelex grammars`: list the selectable grammars.
pub fn list_grammars() {
    for grammar in Grammar::ALL {
        println!("  {:<8} {}", grammar.name(), grammar.description());
    }
}

/// Tokenize `input` and write the tokens to `out`.
pub fn lex_source(
    options: &LexOptions,
    input: &str,
    out: &mut dyn Write,
) -> Result<LexReport, String> {
    debug!(
        path = %options.path,
        grammar = %options.grammar,
        len = input.len(),
        step = options.step,
        "lexing"
    );
    let (initial, rules) = match options.grammar {
        Grammar::Regex => return lex_regex(input, options.start_at, out),
        Grammar::Http => (TABLE, http_rules().map_err(|e| e.to_string())?),
        Grammar::Runs => (RUN_A, RuleTable::empty()),
        Grammar::Octet => (OCTET, RuleTable::empty()),
        Grammar::Hex => (HEX_RUN, RuleTable::empty()),
        Grammar::Empty => (EMPTY, RuleTable::empty()),
    };
    if options.step {
        lex_stepwise(options, input, initial, rules, out)
    } else {
        lex_threaded(options, input, initial, rules, out)
    }
}

fn lex_threaded(
    options: &LexOptions,
    input: &str,
    initial: StateFn,
    rules: Arc<RuleTable>,
    out: &mut dyn Write,
) -> Result<LexReport, String> {
    let mut scanner = Scanner::builder(options.grammar.name(), input)
        .rules(rules)
        .config(options.config.clone())
        .start_at(options.start_at)
        .spawn(initial)
        .map_err(|e| e.to_string())?;
    let mut report = LexReport::default();
    for token in scanner.by_ref() {
        write_token(out, &token, &mut report)?;
    }
    report.halt = Some(scanner.join());
    Ok(report)
}

fn lex_stepwise(
    options: &LexOptions,
    input: &str,
    initial: StateFn,
    rules: Arc<RuleTable>,
    out: &mut dyn Write,
) -> Result<LexReport, String> {
    let mut stepper = Scanner::builder(options.grammar.name(), input)
        .rules(rules)
        .config(options.config.clone())
        .start_at(options.start_at)
        .stepper(initial)
        .map_err(|e| e.to_string())?;
    let mut report = LexReport::default();
    loop {
        let state = stepper.state().map_or("-", |state| state.name());
        let step = stepper.step();
        writeln!(
            out,
            "# step {} {state} [{}..{}] {:?}",
            stepper.steps(),
            stepper.start(),
            stepper.pos(),
            stepper.window()
        )
        .map_err(write_error)?;
        for token in stepper.drain() {
            write_token(out, &token, &mut report)?;
        }
        if let Step::Halted(halt) = step {
            report.halt = Some(halt);
            return Ok(report);
        }
    }
}

fn lex_regex(input: &str, start_at: u32, out: &mut dyn Write) -> Result<LexReport, String> {
    let tokenizer = RegexTokenizer::http().map_err(|e| e.to_string())?;
    let rest = input.get(start_at as usize..).ok_or_else(|| {
        format!("start offset {start_at} is past the end or inside a character")
    })?;
    let mut report = LexReport::default();
    for result in tokenizer.tokenize(rest) {
        match result {
            Ok(token) => {
                let token = Token::new(token.kind(), token.text(), token.offset() + start_at);
                write_token(out, &token, &mut report)?;
            }
            Err(err) => {
                report.errors += 1;
                writeln!(out, "error: {err}").map_err(write_error)?;
            }
        }
    }
    Ok(report)
}

fn write_token(out: &mut dyn Write, token: &Token, report: &mut LexReport) -> Result<(), String> {
    report.tokens += 1;
    if token.is_error() {
        report.errors += 1;
    }
    writeln!(
        out,
        "{:<12} @{}+{} {token}",
        token.kind().name(),
        token.offset(),
        token.len()
    )
    .map_err(write_error)
}

#[allow(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adapter"
)]
fn write_error(e: io::Error) -> String {
    format!("failed to write output: {e}")
}

/// Read the input named on the command line; `-` is stdin.
fn read_input(options: &LexOptions) -> String {
    let path = options.path.as_str();
    let result = if options.reads_stdin() {
        io::read_to_string(io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    match result {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
