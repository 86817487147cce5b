use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Keys starting with this marker are document metadata, never cluster or
/// server names.
pub const METADATA_MARKER: char = '_';

// Built-in property defaults, the lowest layer of the cascade.
pub const DEFAULT_WEIGHT: u32 = 1;
pub const DEFAULT_MAX_FAILS: u32 = 1;
pub const DEFAULT_FAIL_TIMEOUT: &str = "10s";
pub const DEFAULT_DOWN: bool = false;
pub const DEFAULT_BACKUP: bool = false;
pub const DEFAULT_ENABLED: bool = true;

/// One layer of server properties. Used both for `_default` blocks and for
/// the explicit overrides stored on a server entry. Unset fields are omitted
/// on save so the document stays minimal and diff-friendly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PropertySet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fails: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_timeout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub down: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// A server entry as stored in the document: a connection target plus any
/// explicit property overrides. Exactly one target form must be present;
/// that is enforced at resolution time, not here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,

    #[serde(flatten)]
    pub props: PropertySet,
}

/// A cluster as stored in the document: metadata entries plus an ordered map
/// of server entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCluster {
    #[serde(rename = "_default", skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertySet>,

    #[serde(rename = "_ip_hash", skip_serializing_if = "Option::is_none")]
    pub ip_hash: Option<bool>,

    #[serde(rename = "_file", skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(flatten)]
    pub entries: IndexMap<String, RawServer>,
}

impl RawCluster {
    /// Server entries in declaration order, metadata keys excluded.
    pub fn servers(&self) -> impl Iterator<Item = (&str, &RawServer)> {
        self.entries
            .iter()
            .filter(|(name, _)| !name.starts_with(METADATA_MARKER))
            .map(|(name, server)| (name.as_str(), server))
    }
}

/// The whole pool document: an optional global `_default` plus an ordered
/// map of clusters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDocument {
    #[serde(rename = "_default", skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertySet>,

    #[serde(flatten)]
    pub entries: IndexMap<String, RawCluster>,
}

impl RawDocument {
    /// Clusters in declaration order, metadata keys excluded.
    pub fn clusters(&self) -> impl Iterator<Item = (&str, &RawCluster)> {
        self.entries
            .iter()
            .filter(|(name, _)| !name.starts_with(METADATA_MARKER))
            .map(|(name, cluster)| (name.as_str(), cluster))
    }
}
