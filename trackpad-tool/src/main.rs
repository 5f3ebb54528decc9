//! Trackpad tool.
//!
//! Host side helpers for the trackpad gesture engine:
//!
//! - replay: run a recorded sensor trace through the engine, and show what it
//!   would have sent.
//! - config: build a cbor configuration record to flash alongside a build.
//! - defaults: show the default configuration, as a starting point for a
//!   config file.

use std::fs::File;

use anyhow::{Context, Result};
use bbq_trackpad::Config;
use clap::{Parser, Subcommand};
use log::info;

mod trace;

#[derive(Parser)]
#[command(name = "trackpad-tool")]
#[command(about = "Replay trackpad traces and build trackpad config records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded trace through the gesture engine
    Replay {
        /// The trace, one json sample per line
        trace: String,

        /// Config file (yaml) to use instead of the defaults
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,

        /// After the trace ends, keep running timers for up to this many ms
        #[arg(long, value_name = "MS", default_value_t = 2000)]
        settle: u64,
    },

    /// Generate a cbor config record.
    Config {
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: String,

        /// Config file (yaml) to encode, instead of the defaults
        #[arg(long, value_name = "FILE")]
        from: Option<String>,
    },

    /// Print the default config as yaml
    Defaults,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Replay { trace, config, settle } => {
            let config = load_config(config.as_deref())?;
            let samples = trace::load(trace)?;
            info!("replaying {} samples from {}", samples.len(), trace);

            for (time, event) in trace::replay(&config, &samples, *settle)? {
                println!("{:>8} {:?}", time, event);
            }
        }
        Commands::Config { output, from } => {
            let config = load_config(from.as_deref())?;
            let data = config.to_cbor()?;

            println!("Writing {} byte config record to: {}", data.len(), output);
            std::fs::write(output, data)?;
        }
        Commands::Defaults => {
            print!("{}", serde_yaml_ng::to_string(&Config::default())?);
        }
    }

    Ok(())
}

/// Load a config from yaml, or use the defaults.  Settings missing from the
/// file keep their default values.
fn load_config(name: Option<&str>) -> Result<Config> {
    let Some(name) = name else {
        return Ok(Config::default());
    };

    let config: Config = serde_yaml_ng::from_reader(
        File::open(name).with_context(|| format!("opening {}", name))?
    )?;
    config.validate().with_context(|| format!("invalid config in {}", name))?;
    Ok(config)
}
