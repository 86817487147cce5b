mod disable;
mod enable;
mod generate;
mod rotate;
mod weight;

pub use disable::*;
pub use enable::*;
pub use generate::*;
pub use rotate::*;
pub use weight::*;

use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum PoolCmd {
    /// Render the upstream block for a cluster
    Generate {
        cluster: String,

        /// Write to this path instead of the cluster's _file entry
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Take the next active server out of rotation (cycles back to full
    /// rotation once every active server has had a turn)
    Rotate { cluster: String },

    /// Put a server back into service
    Enable { cluster: String, server: String },

    /// Take a server out of service
    Disable { cluster: String, server: String },

    /// Set a server's load-balancing weight
    Weight {
        cluster: String,
        server: String,
        value: u32,
    },
}

pub fn run(cmd: PoolCmd, config: &Path) -> anyhow::Result<()> {
    match cmd {
        PoolCmd::Generate { cluster, out } => generate(config, &cluster, out.as_deref()),
        PoolCmd::Rotate { cluster } => rotate(config, &cluster),
        PoolCmd::Enable { cluster, server } => enable(config, &cluster, &server),
        PoolCmd::Disable { cluster, server } => disable(config, &cluster, &server),
        PoolCmd::Weight {
            cluster,
            server,
            value,
        } => weight(config, &cluster, &server, value),
    }
}
