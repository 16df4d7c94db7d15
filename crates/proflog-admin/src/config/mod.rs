//! Admin config loader (strict parsing).

pub mod schema;

use std::fs;

use proflog_core::error::{ProflogError, Result};

pub use schema::{AdminConfig, AdminSection};

pub fn load_from_file(path: &str) -> Result<AdminConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ProflogError::Configuration(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AdminConfig> {
    let cfg: AdminConfig = serde_yaml::from_str(s)
        .map_err(|e| ProflogError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
