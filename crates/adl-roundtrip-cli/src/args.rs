use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Run the display editor's test save on ADL files and check for changes
#[derive(Debug, Parser)]
#[command(name = "adl-roundtrip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing ADL files to validate
    pub directory: PathBuf,

    /// Config file (default: ~/.config/adl-roundtrip/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Document producer executable, overriding the config file
    #[arg(long)]
    pub producer: Option<PathBuf>,

    /// File the producer writes its regenerated document to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Check every file even after a divergence, then fail with a summary
    #[arg(long)]
    pub keep_going: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
