//! Deterministic nginx `upstream` block generation.

use crate::conf::error::ConfigError;
use crate::conf::types::{Cluster, ResolvedServer};

use std::fs;
use std::path::{Path, PathBuf};

/// Render the upstream block for a cluster. `rotate_index` marks the
/// rotate_index-th *active* server (1-indexed, declaration order) as rotated
/// out for this pass only; the marker is never persisted.
///
/// Identical resolved state and identical `rotate_index` always produce
/// byte-identical output.
pub fn render_upstream(cluster: &Cluster, rotate_index: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!("upstream {} {{\n", cluster.name));

    if cluster.ip_hash {
        out.push_str("    ip_hash;\n");
    }

    // active_count only advances past servers that take traffic, so the
    // rotate index is a position among active servers.
    let mut active_count = 1usize;
    for server in &cluster.servers {
        let rotated = rotate_index == Some(active_count);

        out.push_str(&comment_line(server, rotated));
        out.push_str(&directive_line(server, rotated));

        if server.is_active() {
            active_count += 1;
        }
    }

    out.push_str("}\n");
    out
}

/// One annotation per condition, fixed order, all that apply.
fn comment_line(server: &ResolvedServer, rotated: bool) -> String {
    let mut line = format!("    # {}", server.name);
    if !server.enabled {
        line.push_str(" (disabled)");
    }
    if server.down {
        line.push_str(" (down)");
    }
    if rotated {
        line.push_str(" (rotated out)");
    }
    line.push('\n');
    line
}

fn directive_line(server: &ResolvedServer, rotated: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    // Rotated wins over disabled; only one comment marker is ever applied.
    if rotated {
        parts.push("#".to_owned());
    } else if !server.enabled {
        parts.push("##".to_owned());
    }

    parts.push("server".to_owned());
    parts.push(server.target.address());

    if let Some(weight) = server.weight {
        parts.push(format!("weight={weight}"));
    }
    if let Some(max_fails) = server.max_fails {
        parts.push(format!("max_fails={max_fails}"));
    }
    if let Some(fail_timeout) = &server.fail_timeout {
        parts.push(format!("fail_timeout={fail_timeout}"));
    }
    if server.down {
        parts.push("down".to_owned());
    }
    if server.backup {
        parts.push("backup".to_owned());
    }

    format!("    {};\n", parts.join(" "))
}

/// Render a cluster and write it to `out`, falling back to the cluster's
/// `_file` entry. Returns the path written.
pub fn write_upstream(
    cluster: &Cluster,
    rotate_index: Option<usize>,
    out: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let path = out
        .map(Path::to_path_buf)
        .or_else(|| cluster.file.clone())
        .ok_or_else(|| ConfigError::MissingOutputPath {
            cluster: cluster.name.clone(),
        })?;

    let text = render_upstream(cluster, rotate_index);
    fs::write(&path, text).map_err(|e| ConfigError::write_file(&path, e))?;

    tracing::debug!(cluster = %cluster.name, path = %path.display(), "wrote upstream block");
    Ok(path)
}
