//! poolman: generates nginx `upstream` pool blocks from a human-edited YAML
//! document and provides a persisted rotation primitive for taking servers
//! out of rotation one at a time (e.g. for rolling restarts).
//!
//! The tool is a synchronous, single-shot command. It performs no locking:
//! run at most one invocation per cluster at a time, or the document and the
//! rotation counter can lose updates.

pub mod cli;
pub mod conf;
pub mod logging;
pub mod render;
pub mod rotation;
