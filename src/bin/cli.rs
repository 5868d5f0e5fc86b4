// src/bin/cli.rs
use bgg_pull::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
