use std::process::ExitCode;

use adl_roundtrip_cli::args::Cli;
use adl_roundtrip_cli::settings::BatchSettings;
use adl_roundtrip_cli::{Batch, BatchError};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Divergences have already been reported on stdout
            if !matches!(err.downcast_ref::<BatchError>(), Some(BatchError::Divergent { .. })) {
                eprintln!("Error: {err:#}");
            }
            let code = err
                .downcast_ref::<BatchError>()
                .map(BatchError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = BatchSettings::resolve(cli)?;
    let producer = settings.producer();
    let differ = settings.differ();

    let batch = Batch::new(
        settings.directory.clone(),
        settings.config.extension.clone(),
        &producer,
        &differ,
        settings.normalizer(),
    )
    .keep_going(settings.keep_going);

    let mut stdout = std::io::stdout().lock();
    batch.run(&mut stdout)?;
    Ok(())
}
