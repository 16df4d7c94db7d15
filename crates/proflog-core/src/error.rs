//! Shared error type across proflog crates.

use thiserror::Error;

use crate::metrics::{CounterId, CounterType};

/// Error codes reported over the admin socket (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid counter definition.
    Definition,
    /// Metric set name already registered.
    NameConflict,
    /// Counter mutated through the wrong typed operation.
    TypeMismatch,
    /// Counter id not present in the set.
    UnknownCounter,
    /// Invalid or unbindable configuration.
    Configuration,
    /// Socket connect/read/write failure.
    Transport,
    /// Malformed request.
    BadRequest,
    /// Request larger than the configured limit.
    PayloadTooLarge,
    /// Request names a command nobody registered.
    UnknownCommand,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in error responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Definition => "DEFINITION",
            ClientCode::NameConflict => "NAME_CONFLICT",
            ClientCode::TypeMismatch => "TYPE_MISMATCH",
            ClientCode::UnknownCounter => "UNKNOWN_COUNTER",
            ClientCode::Configuration => "CONFIGURATION",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnknownCommand => "UNKNOWN_COMMAND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProflogError>;

/// Unified error type used by core and admin.
#[derive(Debug, Error)]
pub enum ProflogError {
    #[error("definition error: {0}")]
    Definition(String),
    #[error("metric set already registered: {0}")]
    NameConflict(String),
    #[error("counter {id} is {actual}, not {expected}")]
    TypeMismatch {
        id: CounterId,
        expected: CounterType,
        actual: CounterType,
    },
    #[error("unknown counter id: {0}")]
    UnknownCounter(CounterId),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Error response received from the far end of the admin socket.
    #[error("{code}: {message}")]
    Remote { code: String, message: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl ProflogError {
    /// Map internal error to a stable wire code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ProflogError::Definition(_) => ClientCode::Definition,
            ProflogError::NameConflict(_) => ClientCode::NameConflict,
            ProflogError::TypeMismatch { .. } => ClientCode::TypeMismatch,
            ProflogError::UnknownCounter(_) => ClientCode::UnknownCounter,
            ProflogError::Configuration(_) => ClientCode::Configuration,
            ProflogError::Transport(_) => ClientCode::Transport,
            ProflogError::BadRequest(_) => ClientCode::BadRequest,
            ProflogError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            ProflogError::UnknownCommand(_) => ClientCode::UnknownCommand,
            ProflogError::Remote { .. } | ProflogError::Internal(_) => ClientCode::Internal,
        }
    }
}
