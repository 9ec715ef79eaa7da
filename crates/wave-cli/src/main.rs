//! `wave` CLI — parse, query and write WAVE values from the command line.
//!
//! The input is the text a WebAssembly runtime prints after invoking a
//! component export, for example the output of
//! `wasmtime run --invoke 'get-animal()' animal.wasm`.
//!
//! ## Usage
//!
//! ```sh
//! # Parse WAVE to pretty JSON (stdin → stdout)
//! echo '(record (name "Rex") (age 3))' | wave parse
//!
//! # Normalize to canonical WAVE
//! wave parse --format wave -i result.txt
//!
//! # Print one field (dotted paths reach into nested records)
//! wave get owner.name -i result.txt
//!
//! # Project the get-animal() result
//! wave animal -i result.txt
//!
//! # JSON → WAVE
//! echo '{"name":"Rex","age":3}' | wave encode
//!
//! # Refuse to parse output of a failed invocation
//! wasmtime run --invoke 'get-animal()' animal.wasm | wave animal --exit-status "${PIPESTATUS[0]}"
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` or pass `-v`.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wave_core::{Animal, Value};

#[derive(Parser)]
#[command(
    name = "wave",
    version,
    about = "Parse and write WAVE-style component return values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse WAVE text and print it as JSON or canonical WAVE
    Parse {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        upstream: UpstreamArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print a single field of a top-level record
    Get {
        /// Field name; use dots to reach into nested records (owner.name)
        field: String,
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        upstream: UpstreamArgs,
        /// Print string values without quotes
        #[arg(long)]
        raw: bool,
    },
    /// Project the record returned by get-animal() and print its fields
    Animal {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        upstream: UpstreamArgs,
    },
    /// Encode a JSON document as canonical WAVE
    Encode {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct UpstreamArgs {
    /// Exit status of the invocation that produced the input; non-zero
    /// skips parsing and exits with the same status (0-255)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=255))]
    exit_status: i32,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Wave,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            io,
            upstream,
            format,
        } => {
            check_upstream(&upstream);
            let text = read_input(io.input.as_deref())?;
            let value = wave_core::parse(&text).context("Failed to parse WAVE input")?;
            info!(kind = value.kind(), "parsed value");
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&value)?,
                Format::Wave => wave_core::to_wave(&value),
            };
            write_output(io.output.as_deref(), &format!("{rendered}\n"))?;
        }
        Commands::Get {
            field,
            io,
            upstream,
            raw,
        } => {
            check_upstream(&upstream);
            let text = read_input(io.input.as_deref())?;
            let record = wave_core::parse_top_level_record(&text)
                .context("Failed to parse WAVE input")?;
            let root = Value::Record(record);
            let value = lookup(&root, &field)?;
            let rendered = match value {
                Value::String(s) if raw => s.clone(),
                other => wave_core::to_wave(other),
            };
            write_output(io.output.as_deref(), &format!("{rendered}\n"))?;
        }
        Commands::Animal { io, upstream } => {
            check_upstream(&upstream);
            let text = read_input(io.input.as_deref())?;
            let animal =
                Animal::from_wave(&text).context("Failed to read an animal record")?;
            write_output(io.output.as_deref(), &render_animal(&animal))?;
        }
        Commands::Encode { io } => {
            let json = read_input(io.input.as_deref())?;
            let wave = wave_core::encode(&json).context("Failed to encode JSON as WAVE")?;
            write_output(io.output.as_deref(), &format!("{wave}\n"))?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Output of a failed invocation is never parsed.
fn check_upstream(upstream: &UpstreamArgs) {
    if upstream.exit_status != 0 {
        warn!(
            status = upstream.exit_status,
            "upstream invocation failed; input not parsed"
        );
        eprintln!(
            "Error: upstream invocation exited with status {}; not parsing its output",
            upstream.exit_status
        );
        process::exit(upstream.exit_status);
    }
}

/// Resolve a dotted field path against nested records.
fn lookup<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        let Some(record) = current.as_record() else {
            bail!(
                "Cannot look up `{}` in a {} value (path `{}`)",
                segment,
                current.kind(),
                path
            );
        };
        current = record
            .require(segment)
            .with_context(|| format!("Field path `{path}` not found"))?;
    }
    Ok(current)
}

fn render_animal(animal: &Animal) -> String {
    format!(
        "--- Parsed object ---\n  Name: {}\n  Species: {}\n  Age: {}\n  IsMammal: {}\n",
        animal.name, animal.species, animal.age, animal.is_mammal
    )
}

fn read_input(path: Option<&str>) -> Result<String> {
    let text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    debug!(source = path.unwrap_or("<stdin>"), bytes = text.len(), "read input");
    Ok(text)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            debug!(path, bytes = content.len(), "wrote output");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
