mod document;
mod loader;
mod resolve;
mod tests;

pub mod cascade;
pub mod error;
pub mod types;

pub use document::Document;
pub use error::ConfigError;
