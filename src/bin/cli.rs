// src/bin/cli.rs
use nellis_helper::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
