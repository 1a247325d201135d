//! runelex command-line tokenizer.

mod commands;
mod options;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `RUST_LOG`-filtered subscriber, once.
///
/// Without `RUST_LOG` nothing is installed and the library spans cost only
/// their disabled-callsite check.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "lex" => {
            if args.len() < 3 {
                print_lex_usage();
                std::process::exit(1);
            }
            match options::parse_lex_options(&args[2..]) {
                Ok(options) => commands::lex_file(&options),
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!();
                    print_lex_usage();
                    std::process::exit(1);
                }
            }
        }
        "grammars" => commands::list_grammars(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("runelex {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("unknown command '{other}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("runelex - streaming state-machine tokenizer");
    println!();
    println!("Usage: runelex <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <path|->   Tokenize a file (or stdin) and print one token per line");
    println!("  grammars       List the available grammars");
    println!("  help           Show this message");
    println!("  version        Show the version");
    println!();
    println!("Set RUST_LOG=runelex_core=trace to follow every transition.");
}

fn print_lex_usage() {
    eprintln!("Usage: runelex lex <path|-> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --grammar=<name>     http (default), runs, octet, hex, empty, regex");
    eprintln!("  --step               Drive the scan one transition at a time");
    eprintln!("  --capacity=<n>       Token queue capacity (default: 2)");
    eprintln!("  --from=<offset>      Start scanning at this byte offset");
    eprintln!("  --max-steps=<n>      Halt after n transitions");
    eprintln!("  --strict             Panic on grammar contract violations");
    eprintln!("  --no-progress-check  Do not check that every transition makes progress");
}
