use crate::conf::Document;
use crate::render;

use anyhow::Result;
use std::path::Path;

pub fn weight(config: &Path, cluster: &str, server: &str, value: u32) -> Result<()> {
    let mut doc = Document::load(config)?;

    doc.set_weight(cluster, server, Some(value))?;

    doc.save()?;
    render::write_upstream(doc.cluster(cluster)?, None, None)?;

    println!("Changed {server} weight to {value}");
    Ok(())
}
