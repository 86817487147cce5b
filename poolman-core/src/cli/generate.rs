use crate::conf::Document;
use crate::render;

use anyhow::Result;
use std::path::Path;

pub fn generate(config: &Path, cluster: &str, out: Option<&Path>) -> Result<()> {
    let doc = Document::load(config)?;
    let cluster = doc.cluster(cluster)?;

    render::write_upstream(cluster, None, out)?;

    println!("Saved");
    Ok(())
}
