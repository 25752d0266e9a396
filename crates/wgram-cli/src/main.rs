//! wgram: windowgram flex console.
//!
//! Loads a windowgram (from a file, or a fresh single pane), applies a
//! `;`-separated flex command sequence, and prints the result. The layout
//! classification and the multiplexer split plan are available behind flags.

mod error;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wgram_core::Windowgram;
use wgram_layout::{analyze, resolve};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "wgram",
    about = "Windowgram layout compiler and flex console",
    version
)]
struct Cli {
    /// Flex commands, `;`-separated (e.g. "scale 20x10 ; break 1 2x2").
    #[arg(value_name = "COMMANDS")]
    commands: Option<String>,

    /// Windowgram file to start from.
    #[arg(long, value_name = "FILE")]
    windowgram: Option<PathBuf>,

    /// Pane id for a fresh single-pane windowgram (when no file is given).
    #[arg(long, value_name = "PANE", default_value = "1")]
    new: String,

    /// Print the layout classification (split, tiled, layered).
    #[arg(long)]
    analyze: bool,

    /// Print the split plan for a screen size as JSON, e.g. 80x24.
    #[arg(long, value_name = "WxH")]
    plan: Option<String>,

    /// Enable debug tracing to stderr.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut wg = match &cli.windowgram {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Windowgram::new(&raw)
        }
        None => Windowgram::new(&cli.new),
    };

    if let Some(commands) = &cli.commands {
        wg = table::run_sequence(&wg, commands)?;
    }
    print!("{}", wg.as_str());

    if cli.analyze {
        let analysis = analyze(&wg)?;
        match analysis.overlap {
            Some((first, second)) => {
                println!("{} (panes {first} and {second} overlap)", analysis.kind);
            }
            None => println!("{}", analysis.kind),
        }
    }
    if let Some(screen) = &cli.plan {
        let (w, h) = parse_screen(screen)?;
        let plan = resolve(&wg, w, h)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }
    Ok(())
}

fn parse_screen(arg: &str) -> Result<(u16, u16), CliError> {
    let Some((w, h)) = arg.split_once('x') else {
        return Err(CliError::InvalidScreen(arg.to_string()));
    };
    match (w.parse(), h.parse()) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(CliError::InvalidScreen(arg.to_string())),
    }
}
