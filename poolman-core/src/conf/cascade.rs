//! The property cascade: explicit server value > cluster `_default` >
//! global `_default` > built-in default. Pure functions, no IO.

/// Effective value of a property across the three stored layers. `None`
/// means no layer supplied the property.
pub fn resolve<T>(explicit: Option<T>, cluster_default: Option<T>, global_default: Option<T>) -> Option<T> {
    explicit.or(cluster_default).or(global_default)
}

/// Like [`resolve`], falling back to the built-in default.
pub fn resolve_or<T>(
    explicit: Option<T>,
    cluster_default: Option<T>,
    global_default: Option<T>,
    builtin: T,
) -> T {
    resolve(explicit, cluster_default, global_default).unwrap_or(builtin)
}

/// Whether a new value must be stored as an explicit override, or can be
/// omitted because the cascade below the server already produces it. The
/// cluster default shadows the global default entirely: when a cluster
/// default exists, only it is compared.
pub fn stores_explicit<T: PartialEq>(
    new: &T,
    cluster_default: Option<&T>,
    global_default: Option<&T>,
) -> bool {
    match (cluster_default, global_default) {
        (Some(cluster), _) => new != cluster,
        (None, Some(global)) => new != global,
        (None, None) => true,
    }
}
