use crate::conf::cascade;
use crate::conf::error::ConfigError;
use crate::conf::types::{
    Cluster, PropertySet, RawDocument, ResolvedServer, DEFAULT_FAIL_TIMEOUT, DEFAULT_MAX_FAILS,
    DEFAULT_WEIGHT,
};
use crate::conf::{loader, resolve};

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// The pool document plus its resolved view. Mutations update both sides
/// consistently; nothing touches disk until [`Document::save`].
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    raw: RawDocument,
    resolved: IndexMap<String, Cluster>,
}

impl Document {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let raw = loader::load_document(&path)?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let resolved = resolve::resolve_document(&raw, root)?;

        tracing::debug!(path = %path.display(), clusters = resolved.len(), "loaded pool document");

        Ok(Self {
            path,
            raw,
            resolved,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.resolved.values()
    }

    pub fn cluster(&self, name: &str) -> Result<&Cluster, ConfigError> {
        self.resolved
            .get(name)
            .ok_or_else(|| ConfigError::unknown_cluster(name, self.resolved.keys().map(String::as_str)))
    }

    /// Serialize the raw document back to its path. Key order is stable, so
    /// saving twice without intervening mutation is byte-identical.
    pub fn save(&self) -> Result<(), ConfigError> {
        loader::save_document(&self.path, &self.raw)?;
        tracing::debug!(path = %self.path.display(), "saved pool document");
        Ok(())
    }

    //--------------------------------------------------------------------------
    // Mutators. All route through set_property, which keeps the resolved
    // view and the raw document in sync and applies minimization: an
    // override equal to what the cascade below already produces is removed
    // instead of written.
    //--------------------------------------------------------------------------

    pub fn enable(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.enabled, |s, v| s.enabled = v, true)
    }

    pub fn disable(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.enabled, |s, v| s.enabled = v, false)
    }

    pub fn backup(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.backup, |s, v| s.backup = v, true)
    }

    pub fn nonbackup(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.backup, |s, v| s.backup = v, false)
    }

    pub fn down(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.down, |s, v| s.down = v, true)
    }

    pub fn up(&mut self, cluster: &str, server: &str) -> Result<(), ConfigError> {
        self.set_property(cluster, server, |p| &mut p.down, |s, v| s.down = v, false)
    }

    pub fn set_weight(
        &mut self,
        cluster: &str,
        server: &str,
        new: Option<u32>,
    ) -> Result<(), ConfigError> {
        let value = new.unwrap_or(DEFAULT_WEIGHT);
        self.set_property(cluster, server, |p| &mut p.weight, |s, v| s.weight = Some(v), value)
    }

    pub fn set_max_fails(
        &mut self,
        cluster: &str,
        server: &str,
        new: Option<u32>,
    ) -> Result<(), ConfigError> {
        let value = new.unwrap_or(DEFAULT_MAX_FAILS);
        self.set_property(cluster, server, |p| &mut p.max_fails, |s, v| s.max_fails = Some(v), value)
    }

    pub fn set_fail_timeout(
        &mut self,
        cluster: &str,
        server: &str,
        new: Option<String>,
    ) -> Result<(), ConfigError> {
        let value = new.unwrap_or_else(|| DEFAULT_FAIL_TIMEOUT.to_owned());
        self.set_property(
            cluster,
            server,
            |p| &mut p.fail_timeout,
            |s, v| s.fail_timeout = Some(v),
            value,
        )
    }

    /// The single mutation primitive. `slot` selects the property's slot in
    /// a [`PropertySet`] and `apply` writes the value into the resolved
    /// server.
    fn set_property<T>(
        &mut self,
        cluster: &str,
        server: &str,
        slot: fn(&mut PropertySet) -> &mut Option<T>,
        apply: impl FnOnce(&mut ResolvedServer, T),
        value: T,
    ) -> Result<(), ConfigError>
    where
        T: Clone + PartialEq,
    {
        //----------------------------------------------------------------------
        // Resolved view first
        //----------------------------------------------------------------------
        let available = self
            .resolved
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let resolved_cluster = self.resolved.get_mut(cluster).ok_or_else(|| {
            ConfigError::UnknownCluster {
                name: cluster.to_owned(),
                available,
            }
        })?;
        let resolved_server = resolved_cluster
            .servers
            .iter_mut()
            .find(|s| s.name == server)
            .ok_or_else(|| ConfigError::unknown_server(cluster, server))?;
        apply(resolved_server, value.clone());

        //----------------------------------------------------------------------
        // Raw document, with minimization against the default layers
        //----------------------------------------------------------------------
        let global_default = self.raw.default.as_mut().and_then(|d| slot(d).clone());
        let raw_cluster = self
            .raw
            .entries
            .get_mut(cluster)
            .ok_or_else(|| ConfigError::unknown_server(cluster, server))?;
        let cluster_default = raw_cluster.default.as_mut().and_then(|d| slot(d).clone());
        let raw_server = raw_cluster
            .entries
            .get_mut(server)
            .ok_or_else(|| ConfigError::unknown_server(cluster, server))?;

        let stored = slot(&mut raw_server.props);
        if cascade::stores_explicit(&value, cluster_default.as_ref(), global_default.as_ref()) {
            *stored = Some(value);
        } else {
            *stored = None;
        }

        Ok(())
    }
}
