//! `jsonobj` CLI: format, merge, query, and inspect documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-print compactly (stdin → stdout)
//! echo '{ "a" : [1, 2] }' | jsonobj format
//!
//! # Pretty-print a file, dropping anything nested 3+ levels deep
//! jsonobj format --pretty --max-depth 3 -i payload.json
//!
//! # Print through the time-sliced printer with 2 ms slices
//! jsonobj -v format --slice-ms 2 -i payload.json
//!
//! # Apply user overrides to a default config
//! jsonobj merge defaults.json user.json -o settings.json
//!
//! # Read one value by dotted path
//! jsonobj get events.0.name -i batch.json
//!
//! # Node count, depth, and sizes
//! jsonobj stats -i batch.json
//! ```

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use jsonobj_core::{ParseOptions, PrintTask, Progress, SliceBudget, Value};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "jsonobj",
    version,
    about = "Format, merge, and inspect JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Parser settings shared by every subcommand.
#[derive(Args)]
struct ParseArgs {
    /// Drop values nested this many levels (or more) below the root
    #[arg(long)]
    max_depth: Option<usize>,
    /// Keep values beyond --max-depth verbatim instead of dropping them
    #[arg(long)]
    store_excess: bool,
    /// Reject documents that do not start with '[' or '{'
    #[arg(long)]
    strict: bool,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new()
            .store_excess_as_raw(self.store_excess)
            .strict(self.strict);
        options.max_depth = self.max_depth;
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print it again
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent with tabs, one child per line
        #[arg(long)]
        pretty: bool,
        /// Use the time-sliced printer with slices of this many milliseconds
        #[arg(long)]
        slice_ms: Option<u64>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Merge an override document into a base document
    Merge {
        /// Base document file
        base: String,
        /// Override document file
        overrides: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent with tabs, one child per line
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Print the value at a dotted path (numeric segments index arrays)
    Get {
        /// Path such as `events.0.name`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Indent with tabs, one child per line
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Show node count, nesting depth, and output sizes
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        parse: ParseArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            output,
            pretty,
            slice_ms,
            parse,
        } => {
            let doc = read_document(input.as_deref(), &parse.options())?;
            let text = match slice_ms {
                Some(ms) => print_sliced(&doc, pretty, Duration::from_millis(ms)),
                None => jsonobj_core::print(&doc, pretty),
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Merge {
            base,
            overrides,
            output,
            pretty,
            parse,
        } => {
            let options = parse.options();
            let mut merged = read_document(Some(base.as_str()), &options)?;
            let overrides = read_document(Some(overrides.as_str()), &options)?;
            merged
                .merge(&overrides)
                .context("Failed to merge override into base")?;
            write_output(output.as_deref(), &jsonobj_core::print(&merged, pretty))?;
        }
        Commands::Get {
            path,
            input,
            pretty,
            parse,
        } => {
            let doc = read_document(input.as_deref(), &parse.options())?;
            let found = lookup(&doc, &path)
                .with_context(|| format!("Path not found: {}", path))?;
            write_output(None, &jsonobj_core::print(found, pretty))?;
        }
        Commands::Stats { input, parse } => {
            let doc = read_document(input.as_deref(), &parse.options())?;
            let compact = jsonobj_core::print(&doc, false);
            let pretty = jsonobj_core::print(&doc, true);
            let strict_json = serde_json::from_str::<serde_json::Value>(&compact).is_ok();
            println!("Nodes:        {}", count_nodes(&doc));
            println!("Max level:    {}", max_level(&doc));
            println!("Compact size: {} bytes", compact.len());
            println!("Pretty size:  {} bytes", pretty.len());
            println!("Strict JSON:  {}", if strict_json { "yes" } else { "no" });
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_document(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    let text = read_input(path)?;
    jsonobj_core::try_parse(&text, options).with_context(|| match path {
        Some(path) => format!("Failed to parse document: {}", path),
        None => "Failed to parse document from stdin".to_string(),
    })
}

/// Drive a [`PrintTask`] to completion, one slice per loop iteration.
fn print_sliced(doc: &Value, pretty: bool, slice: Duration) -> String {
    let mut task = PrintTask::new(doc, pretty).with_budget(SliceBudget::Time(slice));
    loop {
        if let Progress::Done(text) = task.resume() {
            tracing::debug!(slices = task.slices(), bytes = text.len(), "cooperative print finished");
            return text;
        }
    }
}

/// Walk `a.b.0.c`: numeric segments index arrays, everything else names a field.
fn lookup<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(doc, |node, segment| match (node, segment.parse::<usize>()) {
            (Value::Array(_), Ok(index)) => node.get(index),
            _ => node.get_field(segment),
        })
}

fn count_nodes(value: &Value) -> usize {
    1 + value.iter().map(count_nodes).sum::<usize>()
}

fn max_level(value: &Value) -> usize {
    value.iter().map(|child| 1 + max_level(child)).max().unwrap_or(0)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
