use clap::Parser;
use poolman_core::cli::{self, PoolCmd};
use poolman_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "poolman",
    version,
    about = "Generate and manage nginx upstream pool configuration"
)]
struct Cli {
    /// Path to the pool document
    #[arg(long, default_value = "pools.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: PoolCmd,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = cli::run(cli.command, &cli.config) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
