//! Error response bodies.
//!
//! Failed requests are answered with `{"code":"<CODE>","msg":"<message>"}`
//! under `Status::Error` instead of dropping the connection.

use serde::{Deserialize, Serialize};

use crate::error::{ProflogError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorBody {
    pub code: String,
    pub msg: String,
}

impl ErrorBody {
    pub fn from_error(err: &ProflogError) -> Self {
        Self {
            code: err.client_code().as_str().to_string(),
            msg: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "code": self.code, "msg": self.msg }).to_string()
    }

    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| ProflogError::BadRequest(format!("invalid error body: {e}")))
    }

    /// Turn a received error body back into an error for the caller.
    pub fn into_error(self) -> ProflogError {
        ProflogError::Remote {
            code: self.code,
            message: self.msg,
        }
    }
}
