//! `redis-conf`: render nBase-ARC Redis configuration files.
//!
//! ```text
//! redis-conf [--config render.toml] render [--set key=value | --set key+=unit]... [--output redis.conf]
//! redis-conf get <key>
//! redis-conf keys
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use redis_conf::config::loader::{load_config, parse_assignment};
use redis_conf::config::schema::{OutputFormat, RenderConfig};
use redis_conf::observability::logging::init_logging;
use redis_conf::output::{build_table, render_directive, render_output, RenderRequest};

#[derive(Parser)]
#[command(name = "redis-conf")]
#[command(about = "Render Redis configuration files from the nBase-ARC defaults", long_about = None)]
struct Cli {
    /// Render config file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG. Defaults to the config file's level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full configuration file
    Render {
        /// Override a directive (repeatable, applied in order after the config
        /// file). `key=value` replaces the whole directive with one value, so
        /// `client-output-buffer-limit=normal 0 0 0` drops the other classes;
        /// `key+=unit` appends one unit to a list directive instead.
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Write to this file instead of the configured destination
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Omit the generated-file header
        #[arg(long)]
        no_header: bool,
    },
    /// Print a single rendered directive
    Get { key: String },
    /// List directive names in output order
    Keys,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "redis-conf failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level);

    if let Some(path) = &cli.config {
        tracing::debug!(
            path = %path.display(),
            overrides = config.overrides.len(),
            "Render config loaded"
        );
    }

    match cli.command {
        Commands::Render {
            set,
            output,
            format,
            no_header,
        } => {
            let assignments = set
                .iter()
                .map(|raw| parse_assignment(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let request = RenderRequest {
                assignments,
                output,
                format,
                no_header,
            };

            let rendered = render_output(&config, &request)?;
            match &rendered.destination {
                Some(path) => {
                    fs::write(path, &rendered.text)?;
                    tracing::info!(
                        path = %path.display(),
                        entries = rendered.entries,
                        "Configuration written"
                    );
                }
                None => print!("{}", rendered.text),
            }
        }
        Commands::Get { key } => match render_directive(&config, &key)? {
            Some(line) => println!("{}", line),
            None => {
                eprintln!("No such directive: {}", key);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Keys => {
            let table = build_table(&config, &[])?;
            for key in table.keys() {
                println!("{}", key);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
