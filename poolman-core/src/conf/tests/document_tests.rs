use crate::conf::error::ConfigError;
use crate::conf::loader;
use crate::conf::Document;

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_doc(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("pools.yml");
    fs::write(&path, yaml).unwrap();
    path
}

const BASIC: &str = "\
web:
  _file: web.conf
  alpha:
    host: 10.0.0.1
    port: 80
  bravo:
    host: 10.0.0.2
    port: 80
";

#[test]
fn unknown_cluster_lists_available_clusters() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), BASIC);
    let doc = Document::load(&path).unwrap();

    // Act
    let err = doc.cluster("nope").unwrap_err();

    // Assert
    match err {
        ConfigError::UnknownCluster { name, available } => {
            assert_eq!(name, "nope");
            assert_eq!(available, "web");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn unknown_server_is_an_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), BASIC);
    let mut doc = Document::load(&path).unwrap();

    // Act
    let err = doc.disable("web", "nope").unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::UnknownServer { .. }));
}

#[test]
fn setting_a_value_implied_by_the_cluster_default_stores_nothing() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(
        dir.path(),
        "\
web:
  _default:
    weight: 5
  alpha:
    host: 10.0.0.1
    port: 80
    weight: 9
",
    );
    let mut doc = Document::load(&path).unwrap();

    // Act: the cluster default already produces 5
    doc.set_weight("web", "alpha", Some(5)).unwrap();
    doc.save().unwrap();

    // Assert: the override was removed, the resolved view updated
    let raw = loader::load_document(&path).unwrap();
    assert_eq!(raw.entries["web"].entries["alpha"].props.weight, None);
    assert_eq!(doc.cluster("web").unwrap().servers[0].weight, Some(5));
}

#[test]
fn setting_a_differing_value_stores_the_override() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(
        dir.path(),
        "\
web:
  _default:
    weight: 5
  alpha:
    host: 10.0.0.1
    port: 80
",
    );
    let mut doc = Document::load(&path).unwrap();

    // Act
    doc.set_weight("web", "alpha", Some(7)).unwrap();
    doc.save().unwrap();

    // Assert
    let raw = loader::load_document(&path).unwrap();
    assert_eq!(raw.entries["web"].entries["alpha"].props.weight, Some(7));
}

#[test]
fn cluster_default_shadows_a_matching_global_default() {
    // Arrange: value equals the global default, but the cluster default is
    // the layer that applies, so the override must be kept.
    let dir = tempdir().unwrap();
    let path = write_doc(
        dir.path(),
        "\
_default:
  weight: 2
web:
  _default:
    weight: 5
  alpha:
    host: 10.0.0.1
    port: 80
",
    );
    let mut doc = Document::load(&path).unwrap();

    // Act
    doc.set_weight("web", "alpha", Some(2)).unwrap();
    doc.save().unwrap();

    // Assert
    let raw = loader::load_document(&path).unwrap();
    assert_eq!(raw.entries["web"].entries["alpha"].props.weight, Some(2));
}

#[test]
fn matching_global_default_is_minimized_when_no_cluster_default() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(
        dir.path(),
        "\
_default:
  weight: 2
web:
  alpha:
    host: 10.0.0.1
    port: 80
    weight: 9
",
    );
    let mut doc = Document::load(&path).unwrap();

    // Act
    doc.set_weight("web", "alpha", Some(2)).unwrap();
    doc.save().unwrap();

    // Assert
    let raw = loader::load_document(&path).unwrap();
    assert_eq!(raw.entries["web"].entries["alpha"].props.weight, None);
}

#[test]
fn reloading_after_save_reproduces_the_resolved_view() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), BASIC);
    let mut doc = Document::load(&path).unwrap();

    doc.set_weight("web", "alpha", Some(3)).unwrap();
    doc.disable("web", "bravo").unwrap();
    doc.set_fail_timeout("web", "alpha", None).unwrap();

    // Act
    doc.save().unwrap();
    let reloaded = Document::load(&path).unwrap();

    // Assert
    assert_eq!(reloaded.cluster("web").unwrap(), doc.cluster("web").unwrap());
}

#[test]
fn save_is_idempotent() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(
        dir.path(),
        "\
_default:
  max_fails: 2
web:
  _file: web.conf
  _ip_hash: true
  alpha:
    host: 10.0.0.1
    port: 80
    weight: 4
",
    );
    let doc = Document::load(&path).unwrap();

    // Act
    doc.save().unwrap();
    let first = fs::read_to_string(&path).unwrap();
    doc.save().unwrap();
    let second = fs::read_to_string(&path).unwrap();

    // Assert
    assert_eq!(first, second);
}

#[test]
fn mutators_update_the_resolved_view_immediately() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), BASIC);
    let mut doc = Document::load(&path).unwrap();

    // Act
    doc.disable("web", "alpha").unwrap();
    doc.down("web", "bravo").unwrap();
    doc.backup("web", "bravo").unwrap();

    // Assert
    let cluster = doc.cluster("web").unwrap();
    assert!(!cluster.servers[0].enabled);
    assert!(cluster.servers[1].down);
    assert!(cluster.servers[1].backup);
    assert_eq!(cluster.active_servers().count(), 0);

    // Act: and back again
    doc.enable("web", "alpha").unwrap();
    doc.up("web", "bravo").unwrap();
    doc.nonbackup("web", "bravo").unwrap();

    // Assert
    let cluster = doc.cluster("web").unwrap();
    assert!(cluster.servers[0].enabled);
    assert!(!cluster.servers[1].down);
    assert!(!cluster.servers[1].backup);
}

#[test]
fn nil_weight_falls_back_to_builtin_default() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), BASIC);
    let mut doc = Document::load(&path).unwrap();

    // Act
    doc.set_weight("web", "alpha", None).unwrap();
    doc.set_max_fails("web", "alpha", None).unwrap();
    doc.set_fail_timeout("web", "alpha", None).unwrap();

    // Assert
    let server = &doc.cluster("web").unwrap().servers[0];
    assert_eq!(server.weight, Some(1));
    assert_eq!(server.max_fails, Some(1));
    assert_eq!(server.fail_timeout.as_deref(), Some("10s"));
}
