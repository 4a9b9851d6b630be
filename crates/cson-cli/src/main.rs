//! `cson` CLI: decode, validate, and summarize CSON files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decode CSON to JSON Lines (stdin → stdout)
//! printf '1,{2,3}\ntrue,"x"\n' | cson decode
//!
//! # Decode from file to file, pretty-printing each record
//! cson decode -i data.cson -o data.jsonl --pretty
//!
//! # Keep the records decoded before a malformed line
//! cson decode -i data.cson --partial
//!
//! # Validate without producing output
//! cson check -i data.cson
//!
//! # Count lines and value kinds
//! cson stats -i data.cson
//! ```
//!
//! Set `RUST_LOG=debug` to see per-line decode events on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cson_core::{Decoder, Node, NodeKind};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cson",
    version,
    about = "CSON (Comma-Separated Object Notation) CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode CSON into JSON, one JSON value per input line
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print each JSON value
        #[arg(long)]
        pretty: bool,
        /// On a malformed line, still write the records decoded before it
        #[arg(long)]
        partial: bool,
    },
    /// Check that the input is valid CSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show line and value-kind counts
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            output,
            pretty,
            partial,
        } => {
            let decoder = Decoder::new(open_input(input.as_deref())?);
            let (nodes, failure) = if partial {
                let result = decoder.decode_all_partial();
                (result.nodes, result.error)
            } else {
                let nodes = decoder.decode_all().context("Failed to decode CSON")?;
                (nodes, None)
            };

            let rendered = render_json_lines(&nodes, pretty)?;
            write_output(output.as_deref(), &rendered)?;

            if let Some(err) = failure {
                return Err(anyhow::Error::new(err).context(format!(
                    "Failed to decode CSON after {} record(s)",
                    nodes.len()
                )));
            }
        }
        Commands::Check { input } => {
            let nodes = Decoder::new(open_input(input.as_deref())?)
                .decode_all()
                .context("Invalid CSON")?;
            println!("{} line(s) OK", nodes.len());
        }
        Commands::Stats { input } => {
            let nodes = Decoder::new(open_input(input.as_deref())?)
                .decode_all()
                .context("Failed to decode CSON")?;
            let mut counts = HashMap::new();
            for node in &nodes {
                // The implicit per-line object is not counted as a value.
                for child in node.as_list().unwrap_or_default() {
                    count_kinds(child, &mut counts);
                }
            }
            println!("Lines:      {}", nodes.len());
            for kind in [
                NodeKind::Integer,
                NodeKind::Float,
                NodeKind::String,
                NodeKind::Bool,
                NodeKind::Object,
                NodeKind::Array,
            ] {
                let label = format!("{kind}:");
                println!("{label:<12}{}", counts.get(&kind).unwrap_or(&0));
            }
        }
    }

    Ok(())
}

/// Logging goes to stderr so it never mixes with decoded output.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn count_kinds(node: &Node, counts: &mut HashMap<NodeKind, usize>) {
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        *counts.entry(node.kind()).or_insert(0) += 1;
        pending.extend(node.as_list().unwrap_or_default());
    }
}

fn render_json_lines(nodes: &[Node], pretty: bool) -> Result<String> {
    let mut out = String::new();
    for node in nodes {
        let line = if pretty {
            serde_json::to_string_pretty(node)?
        } else {
            serde_json::to_string(node)?
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open file: {}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
