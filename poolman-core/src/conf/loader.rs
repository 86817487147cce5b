use crate::conf::error::ConfigError;
use crate::conf::types::RawDocument;

use std::fs;
use std::path::Path;

pub fn load_document(path: &Path) -> Result<RawDocument, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    serde_yaml::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}

pub fn save_document(path: &Path, raw: &RawDocument) -> Result<(), ConfigError> {
    let s = serde_yaml::to_string(raw).map_err(|e| ConfigError::Serialize { source: e })?;
    fs::write(path, s).map_err(|e| ConfigError::write_file(path, e))
}
