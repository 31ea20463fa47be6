//! Reads a saved registry result page from stdin and prints its records as
//! JSON on stdout.
//!
//! Usage: `extract_stdin [--url PAGE_URL] [--config OPTIONS.json] [--max N]`
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `warn`).

use std::env;
use std::error::Error;
use std::io::{self, Read};

use fips_search::classify::classify_document;
use fips_search::extractor::{run_chain, ExtractContext};
use fips_search::{dom, Classification, Options, Record, StrategyKind};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Output {
    classification: Classification,
    strategy: Option<StrategyKind>,
    records: Vec<Record>,
}

#[derive(Default)]
struct Args {
    url: Option<String>,
    config: Option<String>,
    max: Option<usize>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut parsed = Args::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => parsed.url = Some(args.next().ok_or("--url needs a value")?),
            "--config" => parsed.config = Some(args.next().ok_or("--config needs a value")?),
            "--max" => parsed.max = Some(args.next().ok_or("--max needs a value")?.parse()?),
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }
    Ok(parsed)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = parse_args()?;

    let mut options = match &args.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    if let Some(max) = args.max {
        options.max_records = max;
    }
    options.validate()?;

    let mut html = String::new();
    io::stdin().read_to_string(&mut html)?;

    let doc = dom::parse(&html);
    let classification = classify_document(&doc, &options);
    let output = match classification {
        Classification::HasResults => {
            let ctx = ExtractContext::new(&options, args.url.as_deref());
            let result = run_chain(&doc, &ctx).result;
            Output {
                classification,
                strategy: result.strategy,
                records: result.into_records(),
            }
        }
        Classification::NoResults => Output {
            classification,
            strategy: None,
            records: Vec::new(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
