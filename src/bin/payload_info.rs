//! Print the instruments configured in a payload file.
//!
//! ```bash
//! payload-info config/payload.yaml
//! payload-info --config settings.toml
//! RUST_LOG=container_payload=debug payload-info --format json payload.cfg
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use container_payload::{logging, ConfigFormat, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "payload-info")]
#[command(about = "Show the instruments configured for a container", long_about = None)]
struct Cli {
    /// Payload file (.json, .yaml or .yml). Overrides the settings file.
    file: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long, default_value = "config/settings.toml")]
    config: PathBuf,

    /// Payload format, overriding extension detection
    #[arg(short, long, value_parser = parse_format)]
    format: Option<ConfigFormat>,

    /// Also print the 6-byte wire address of each instrument
    #[arg(short, long)]
    wire: bool,
}

fn parse_format(value: &str) -> Result<ConfigFormat, String> {
    ConfigFormat::from_extension(value).ok_or_else(|| format!("unknown format '{value}'"))
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.file {
        Some(file) => Settings::for_payload_file(file),
        None => Settings::load_from(&cli.config),
    }
    .context("Failed to load settings")?;

    if let Some(format) = cli.format {
        settings.format = Some(format);
    }

    logging::init(&settings.log_level);

    let payload = settings.load_payload().with_context(|| {
        format!(
            "Failed to load payload from '{}'",
            settings.payload_file.display()
        )
    })?;

    println!("{} instrument(s) in {}", payload.len(), settings.payload_file.display());
    for id in payload.ids() {
        let Some(inst) = payload.get(id) else {
            continue;
        };
        println!();
        print!("{inst}");
        if cli.wire {
            match inst.address_bytes() {
                Some(bytes) => println!("Wire address:\t{bytes:02X?}"),
                None => println!("Wire address:\tinvalid"),
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
