//! Persisted rotation state: one plain-text counter file per cluster,
//! driving which active server is currently out of rotation.
//!
//! The counter lives next to the pool document as `.rotate-<cluster>`. It is
//! absent while no rotation is in progress, holds `n` after the n-th step,
//! and is deleted when the cycle completes, so a cluster with `A` active
//! servers cycles in exactly `A + 1` invocations.

use crate::conf::error::ConfigError;
use crate::conf::types::ResolvedServer;
use crate::conf::Document;
use crate::render;

use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE_PREFIX: &str = ".rotate-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// One more server was taken out; `server` is its host (or upstream
    /// string when no host/port form exists).
    Rotated { server: String },
    /// The cycle finished: full rotation was restored and the counter file
    /// removed.
    Completed,
}

/// Location of the rotation counter for a cluster, next to the document.
pub fn state_file(document: &Path, cluster: &str) -> PathBuf {
    let dir = document.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{STATE_FILE_PREFIX}{cluster}"))
}

/// Advance the rotation state machine for one cluster and rewrite its
/// upstream block. The completing call renders *before* clearing state, so
/// the written file has every server back in rotation.
pub fn rotate(doc: &Document, cluster: &str) -> Result<RotationOutcome, ConfigError> {
    let cluster = doc.cluster(cluster)?;
    let state_path = state_file(doc.path(), &cluster.name);

    let step = match read_state(&state_path)? {
        Some(stored) => stored + 1,
        None => 1,
    };

    let active: Vec<&ResolvedServer> = cluster.active_servers().collect();
    render::write_upstream(cluster, Some(step), None)?;

    if step > active.len() {
        clear_state(&state_path);
        tracing::info!(cluster = %cluster.name, "rotation cycle complete");
        Ok(RotationOutcome::Completed)
    } else {
        write_state(&state_path, step)?;
        let server = active[step - 1].target.identifier().to_owned();
        tracing::info!(cluster = %cluster.name, step, %server, "rotated out");
        Ok(RotationOutcome::Rotated { server })
    }
}

fn read_state(path: &Path) -> Result<Option<usize>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::RotationState {
        path: path.to_path_buf(),
        source: e,
    })?;
    let step = contents
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::CorruptRotationState {
            path: path.to_path_buf(),
            contents: contents.trim().to_owned(),
        })?;
    Ok(Some(step))
}

fn write_state(path: &Path, step: usize) -> Result<(), ConfigError> {
    fs::write(path, step.to_string()).map_err(|e| ConfigError::RotationState {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove the counter file (best-effort).
fn clear_state(path: &Path) {
    let _ = fs::remove_file(path);
}
