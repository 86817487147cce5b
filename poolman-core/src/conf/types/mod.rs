pub mod raw;
pub mod resolved;

pub use raw::*;
pub use resolved::*;
