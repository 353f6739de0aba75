use std::path::PathBuf;

use adl_roundtrip_config::Config;
use adl_roundtrip_engine::{ExternalDiff, Normalizer, NormalizerOptions};

use crate::args::Cli;
use crate::error::BatchError;
use crate::producer::ProcessProducer;

/// Config file values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub directory: PathBuf,
    pub config: Config,
    pub keep_going: bool,
}

impl BatchSettings {
    pub fn resolve(cli: &Cli) -> Result<Self, BatchError> {
        let config = match &cli.config {
            Some(path) => Config::load_from_path(path)?
                .ok_or_else(|| BatchError::ConfigNotFound(path.clone()))?,
            None => Config::load()?.unwrap_or_else(|| {
                log::debug!(
                    "No config file at {}, using defaults",
                    Config::config_path().display()
                );
                Config::default()
            }),
        };
        Ok(Self::with_overrides(cli, config))
    }

    pub fn with_overrides(cli: &Cli, mut config: Config) -> Self {
        if let Some(program) = &cli.producer {
            config.producer.program = program.clone();
        }
        if let Some(output) = &cli.output {
            config.producer.output = output.clone();
        }
        Self {
            directory: cli.directory.clone(),
            config,
            keep_going: cli.keep_going,
        }
    }

    pub fn producer(&self) -> ProcessProducer {
        let producer = &self.config.producer;
        ProcessProducer::new(
            producer.program.clone(),
            producer.args.clone(),
            producer.output.clone(),
        )
    }

    pub fn differ(&self) -> ExternalDiff {
        ExternalDiff::new(self.config.diff.program.clone(), self.config.diff.args.clone())
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&NormalizerOptions {
            width_widgets: self.config.normalize.width_widgets.clone(),
        })
    }
}
