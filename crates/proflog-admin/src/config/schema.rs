use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use proflog_core::error::{ProflogError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    pub version: u32,

    #[serde(default)]
    pub admin: AdminSection,
}

impl AdminConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ProflogError::Configuration(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.admin.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminSection {
    /// Unix socket path; empty disables the admin socket.
    #[serde(default)]
    pub socket_path: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            socket_path: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl AdminSection {
    /// Section bound to `path` with default limits.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.request_timeout_ms) {
            return Err(ProflogError::Configuration(
                "admin.request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(1..=1048576).contains(&self.max_request_bytes) {
            return Err(ProflogError::Configuration(
                "admin.max_request_bytes must be between 1 and 1048576".into(),
            ));
        }
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        !self.socket_path.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_request_timeout_ms() -> u64 {
    5000
}
fn default_max_request_bytes() -> usize {
    4096
}
