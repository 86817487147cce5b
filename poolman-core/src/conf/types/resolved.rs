use std::path::PathBuf;

/// Connection target for a server: host+port, or a literal upstream string
/// (e.g. a unix socket address).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    HostPort { host: String, port: u16 },
    Upstream(String),
}

impl Target {
    /// The address as it appears in the rendered server directive.
    pub fn address(&self) -> String {
        match self {
            Target::HostPort { host, port } => format!("{host}:{port}"),
            Target::Upstream(upstream) => upstream.clone(),
        }
    }

    /// The identifier reported by rotation: the host, or the upstream string
    /// when no host/port form is present.
    pub fn identifier(&self) -> &str {
        match self {
            Target::HostPort { host, .. } => host,
            Target::Upstream(upstream) => upstream,
        }
    }
}

/// A server entry with the cascade applied. The numeric/duration properties
/// stay unset unless some layer supplied them; the flags always resolve to a
/// concrete value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedServer {
    pub name: String,
    pub target: Target,
    pub weight: Option<u32>,
    pub max_fails: Option<u32>,
    pub fail_timeout: Option<String>,
    pub down: bool,
    pub backup: bool,
    pub enabled: bool,
}

impl ResolvedServer {
    /// A server takes traffic when it is enabled and not marked down.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.down
    }
}

/// A resolved, renderable view of one named pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub name: String,
    pub ip_hash: bool,
    pub file: Option<PathBuf>,
    pub servers: Vec<ResolvedServer>,
}

impl Cluster {
    /// Servers currently taking traffic, in declaration order.
    pub fn active_servers(&self) -> impl Iterator<Item = &ResolvedServer> {
        self.servers.iter().filter(|s| s.is_active())
    }
}
