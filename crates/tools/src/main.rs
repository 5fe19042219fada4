use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use foundation::Viewport;
use navigator::{EllipsoidGlobe, FlatGlobe, Globe, LookAtNavigator, NavigatorConfig};
use tools::{Replay, Script};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "globe")]
#[command(about = "Replay pointer input against a look-at globe navigator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an input script and print the camera per redrawn frame as JSON.
    Replay(ReplayArgs),
    /// Print the default navigator configuration as JSON.
    Defaults,
}

#[derive(Args)]
struct ReplayArgs {
    script: PathBuf,
    /// Navigator configuration JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Navigate a flat 2D map instead of the ellipsoid.
    #[arg(long)]
    flat: bool,
    #[arg(long, default_value_t = 1024.0)]
    width: f64,
    #[arg(long, default_value_t = 768.0)]
    height: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Replay(args) => cmd_replay(args),
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&NavigatorConfig::default())?);
            Ok(())
        }
    }
}

fn cmd_replay(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("parse {path:?}: {e}"))?
        }
        None => NavigatorConfig::default(),
    };

    let text = fs::read_to_string(&args.script).map_err(|e| format!("read {:?}: {e}", args.script))?;
    let script = Script::from_json(&text)?;

    let globe: Box<dyn Globe> = if args.flat {
        Box::new(FlatGlobe::default())
    } else {
        Box::new(EllipsoidGlobe::default())
    };
    let viewport = Viewport::with_size(args.width, args.height);
    let navigator = LookAtNavigator::new(globe, viewport, config)?;

    info!(script = ?args.script, steps = script.steps.len(), flat = args.flat, "replaying");
    let mut replay = Replay::new(navigator)?;
    let report = replay.run(&script);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
