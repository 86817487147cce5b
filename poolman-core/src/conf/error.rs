use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read pool document {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing / serialization
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize pool document: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },

    // Lookup
    #[error("unknown cluster '{name}' (available: {available})")]
    UnknownCluster { name: String, available: String },

    #[error("unknown server '{server}' in cluster '{cluster}'")]
    UnknownServer { cluster: String, server: String },

    // Structure
    #[error("server '{server}' must define either host/port or upstream")]
    MissingTarget { server: String },

    #[error("cluster '{cluster}' has no _file entry and no output path was given")]
    MissingOutputPath { cluster: String },

    // Rotation state
    #[error("failed to read rotation state {path}: {source}")]
    RotationState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt rotation state {path}: {contents:?}")]
    CorruptRotationState { path: PathBuf, contents: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_cluster<'a>(
        name: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownCluster {
            name: name.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    pub fn unknown_server(cluster: impl Into<String>, server: impl Into<String>) -> Self {
        Self::UnknownServer {
            cluster: cluster.into(),
            server: server.into(),
        }
    }
}
