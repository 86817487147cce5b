use crate::conf::cascade;
use crate::conf::error::ConfigError;
use crate::conf::types::{
    Cluster, PropertySet, RawCluster, RawDocument, RawServer, ResolvedServer, Target,
    DEFAULT_BACKUP, DEFAULT_DOWN, DEFAULT_ENABLED,
};

use indexmap::IndexMap;
use std::path::Path;

/// Build the resolved view of a parsed document. `root` is the directory the
/// document lives in; relative `_file` entries are resolved against it.
pub fn resolve_document(
    raw: &RawDocument,
    root: &Path,
) -> Result<IndexMap<String, Cluster>, ConfigError> {
    let mut clusters = IndexMap::new();
    for (name, raw_cluster) in raw.clusters() {
        let cluster = resolve_cluster(name, raw_cluster, raw.default.as_ref(), root)?;
        clusters.insert(name.to_owned(), cluster);
    }
    Ok(clusters)
}

fn resolve_cluster(
    name: &str,
    raw: &RawCluster,
    global_default: Option<&PropertySet>,
    root: &Path,
) -> Result<Cluster, ConfigError> {
    let mut servers = Vec::new();
    for (server_name, raw_server) in raw.servers() {
        servers.push(resolve_server(
            server_name,
            raw_server,
            raw.default.as_ref(),
            global_default,
        )?);
    }

    Ok(Cluster {
        name: name.to_owned(),
        ip_hash: raw.ip_hash.unwrap_or(false),
        file: raw.file.as_ref().map(|f| root.join(f)),
        servers,
    })
}

fn resolve_server(
    name: &str,
    raw: &RawServer,
    cluster_default: Option<&PropertySet>,
    global_default: Option<&PropertySet>,
) -> Result<ResolvedServer, ConfigError> {
    //--------------------------------------------------------------------------
    // Target: host/port wins when both forms are present; an incomplete
    // host/port pair is rejected rather than silently falling back.
    //--------------------------------------------------------------------------
    let target = match (&raw.host, raw.port, &raw.upstream) {
        (Some(host), Some(port), _) => Target::HostPort {
            host: host.clone(),
            port,
        },
        (None, None, Some(upstream)) => Target::Upstream(upstream.clone()),
        _ => {
            return Err(ConfigError::MissingTarget {
                server: name.to_owned(),
            });
        }
    };

    //--------------------------------------------------------------------------
    // Properties: overlay global default, cluster default, explicit values.
    //--------------------------------------------------------------------------
    let explicit = &raw.props;
    let cluster = cluster_default.cloned().unwrap_or_default();
    let global = global_default.cloned().unwrap_or_default();

    Ok(ResolvedServer {
        name: name.to_owned(),
        target,
        weight: cascade::resolve(explicit.weight, cluster.weight, global.weight),
        max_fails: cascade::resolve(explicit.max_fails, cluster.max_fails, global.max_fails),
        fail_timeout: cascade::resolve(
            explicit.fail_timeout.clone(),
            cluster.fail_timeout,
            global.fail_timeout,
        ),
        down: cascade::resolve_or(explicit.down, cluster.down, global.down, DEFAULT_DOWN),
        backup: cascade::resolve_or(explicit.backup, cluster.backup, global.backup, DEFAULT_BACKUP),
        enabled: cascade::resolve_or(
            explicit.enabled,
            cluster.enabled,
            global.enabled,
            DEFAULT_ENABLED,
        ),
    })
}
