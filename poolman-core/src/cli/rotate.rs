use crate::conf::Document;
use crate::rotation::{self, RotationOutcome};

use anyhow::Result;
use std::path::Path;

pub fn rotate(config: &Path, cluster: &str) -> Result<()> {
    let doc = Document::load(config)?;

    match rotation::rotate(&doc, cluster)? {
        RotationOutcome::Rotated { server } => println!("{server}"),
        RotationOutcome::Completed => println!("Done"),
    }

    Ok(())
}
