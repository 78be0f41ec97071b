use bevy::prelude::*;
use std::path::PathBuf;

/// Command-line arguments parsed at startup.
#[derive(Resource, Debug, Default, PartialEq)]
pub struct CliArgs {
    /// Character roster to load.
    /// Usage: `cargo run -- --roster assets/roster.json`
    pub roster: Option<PathBuf>,

    /// Dialogue script to run. The app exits when the script finishes.
    /// Usage: `cargo run -- --script assets/intro.json`
    pub script: Option<PathBuf>,

    /// Printer settings file, overriding the one in the config directory.
    /// Usage: `cargo run -- --settings printer.json`
    pub settings: Option<PathBuf>,
}

impl CliArgs {
    /// Parse the process command line.
    /// Supports:
    /// - `--roster <path>`: Character roster JSON
    /// - `--script <path>`: Dialogue script JSON
    /// - `--settings <path>`: Printer settings JSON
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse_from(&args)
    }

    /// Parse arguments, excluding the program name.
    pub fn parse_from(args: &[String]) -> Self {
        let mut cli = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            let slot = match args[i].as_str() {
                "--roster" => Some(&mut cli.roster),
                "--script" => Some(&mut cli.script),
                "--settings" => Some(&mut cli.settings),
                arg => {
                    if arg.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", arg);
                    }
                    None
                }
            };

            match (slot, args.get(i + 1)) {
                (Some(slot), Some(value)) => {
                    info!("CLI: {} = '{}'", args[i], value);
                    *slot = Some(PathBuf::from(value));
                    i += 2;
                }
                (Some(_), None) => {
                    warn!("CLI: {} requires a path argument", args[i]);
                    i += 1;
                }
                (None, _) => i += 1,
            }
        }

        cli
    }
}
