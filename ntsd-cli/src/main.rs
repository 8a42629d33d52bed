use clap::Parser;
use cli::{Cli, Commands};

mod cli;
mod describe;
mod find;
mod input;
mod roundtrip;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Describe(cmd) => describe::describe(cmd)?,
        Commands::FindRight(cmd) => find::find_right(cmd)?,
        Commands::FindExtendedRight(cmd) => find::find_extended_right(cmd)?,
        Commands::Roundtrip(cmd) => roundtrip::roundtrip(cmd)?,
    }
    Ok(())
}
