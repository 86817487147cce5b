use crate::conf::Document;
use crate::render;

use anyhow::Result;
use std::path::Path;

pub fn disable(config: &Path, cluster: &str, server: &str) -> Result<()> {
    let mut doc = Document::load(config)?;

    // Under ip_hash a removed server would reshuffle the hash ring, so the
    // server is marked down instead of dropped from the pool.
    if doc.cluster(cluster)?.ip_hash {
        doc.down(cluster, server)?;
    } else {
        doc.disable(cluster, server)?;
    }

    doc.save()?;
    render::write_upstream(doc.cluster(cluster)?, None, None)?;

    println!("Disabled {server}");
    Ok(())
}
