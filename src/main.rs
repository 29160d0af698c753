use std::path::Path;

use anyhow::Result;
use clap::Parser;

use exult_rust::logging::{log_add, log_init, LogLevel};
use exult_rust::{app, config, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = config::load_config(cli.config.as_deref())?;
    let options = cli.merge_into_options(options)?;

    log_init(
        options.log_level.unwrap_or_default(),
        options.log_file.as_deref().map(Path::new),
    )?;
    log::debug!("Options: {:?}", options);

    app::run(&cli.input, &cli.output, &options)?;
    log_add(
        LogLevel::Info,
        &format!("Scaled {} to {}", cli.input.display(), cli.output.display()),
    );
    Ok(())
}
