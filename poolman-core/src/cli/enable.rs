use crate::conf::Document;
use crate::render;

use anyhow::Result;
use std::path::Path;

pub fn enable(config: &Path, cluster: &str, server: &str) -> Result<()> {
    let mut doc = Document::load(config)?;

    doc.enable(cluster, server)?;
    if doc.cluster(cluster)?.ip_hash {
        // Mirror of disable: ip_hash clusters park servers with `down`.
        doc.up(cluster, server)?;
    }

    doc.save()?;
    render::write_upstream(doc.cluster(cluster)?, None, None)?;

    println!("Enabled {server}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::Document;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn enable_restores_a_disabled_server() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("pools.yml");
        fs::write(
            &path,
            "\
web:
  _file: web.conf
  alpha:
    host: 10.0.0.1
    port: 80
    enabled: false
",
        )
        .unwrap();

        // Act
        enable(&path, "web", "alpha").unwrap();

        // Assert
        let doc = Document::load(&path).unwrap();
        assert!(doc.cluster("web").unwrap().servers[0].enabled);
    }

    #[test]
    fn enable_also_clears_down_under_ip_hash() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("pools.yml");
        fs::write(
            &path,
            "\
web:
  _file: web.conf
  _ip_hash: true
  alpha:
    host: 10.0.0.1
    port: 80
    down: true
",
        )
        .unwrap();

        // Act
        enable(&path, "web", "alpha").unwrap();

        // Assert
        let doc = Document::load(&path).unwrap();
        let server = &doc.cluster("web").unwrap().servers[0];
        assert!(server.enabled);
        assert!(!server.down);
        assert!(server.is_active());
    }
}
