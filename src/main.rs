use anyhow::{Context, Result};
use collate::Collation;
use config::{Config, Mode, USAGE};
use dedup::distinct;
use error::Error;
use linkedlist::{List, NodeArena};
use printer::print_tokens;
use std::{
    env,
    io::{self, BufRead, BufWriter, IsTerminal, Write},
    process,
};
use token::TokenSource;
use tracing::{debug, info};

mod collate;
mod config;
mod dedup;
mod error;
mod linkedlist;
mod mergesort;
mod printer;
mod token;

/*
 * Logs go to stderr so they never mix with the words on stdout.
 * RUST_LOG takes precedence over the verbosity flag.
 */
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "listsort=debug"
    } else {
        "listsort=warn"
    };
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/*
 * Read, transform and print. Every node comes from <arena>, which the
 * caller releases once this returns.
 */
fn pipeline<R: BufRead, W: Write>(
    config: &Config,
    arena: &NodeArena,
    source: TokenSource<R>,
    out: &mut W,
) -> Result<()> {
    match config.mode {
        Mode::Sort => {
            let list = List::try_build(arena, source).context("Failed to read words")?;
            if list.is_empty() {
                debug!("no words read, nothing to sort");
                return Ok(());
            }
            let collation = Collation::new(config.folding);
            let list = list.sort_by(|a, b| collation.tokens_le(a, b));
            info!(words = list.len(), folding = ?config.folding, "words sorted");
            print_tokens(&list, out).context("Failed to write sorted words")?;
        }
        Mode::Uniq => {
            let list = distinct(arena, source).context("Failed to read words")?;
            if config.count {
                writeln!(out, "{}", list.len()).context("Failed to write count")?;
                out.flush().context("Failed to write count")?;
            } else {
                print_tokens(&list, out).context("Failed to write distinct words")?;
            }
        }
    }
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let source = TokenSource::new(io::stdin().lock(), config.overlong)?;
    let mut out = BufWriter::new(io::stdout().lock());

    let mut arena = NodeArena::with_limit(config.memory_limit);
    pipeline(config, &arena, source, &mut out)?;
    arena.release();
    Ok(())
}

fn main() {
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            process::exit(1);
        }
    };
    if config.help {
        println!("{}", USAGE);
        return;
    }
    init_logging(config.verbose);

    if let Err(err) = run(&config) {
        let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
        eprintln!("Error : {:#}", err);
        process::exit(code);
    }
}
