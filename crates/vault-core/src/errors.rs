//! Error types for the exchange vault client

use thiserror::Error;

/// Programmatic error classification.
///
/// Callers branch on the kind, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameters,
    ValidationError,
    InsufficientBalance,
    InsufficientReserves,
    ArithmeticOverflow,
    DivisionByZero,
    NetworkError,
    Timeout,
    Unauthorized,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParameters => "invalid_parameters",
            Self::ValidationError => "validation_error",
            Self::InsufficientBalance => "insufficient_balance",
            Self::InsufficientReserves => "insufficient_reserves",
            Self::ArithmeticOverflow => "arithmetic_overflow",
            Self::DivisionByZero => "division_by_zero",
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::Unauthorized => "unauthorized",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by the validation, numeric, building, and query layers
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameters: {message}")]
    InvalidParameters { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Insufficient reserves: need {required}, have {available}")]
    InsufficientReserves { required: u64, available: u64 },

    #[error("Arithmetic overflow: {message}")]
    ArithmeticOverflow { message: String },

    #[error("Division by zero: {message}")]
    DivisionByZero { message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<RpcError>,
    },

    #[error("Request timed out: {message}")]
    Timeout {
        message: String,
        #[source]
        source: Option<RpcError>,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        #[source]
        source: Option<RpcError>,
    },

    #[error("Unknown error: {message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<RpcError>,
    },
}

impl Error {
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::ArithmeticOverflow {
            message: message.into(),
        }
    }

    pub fn division_by_zero(message: impl Into<String>) -> Self {
        Self::DivisionByZero {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            source: None,
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameters { .. } => ErrorKind::InvalidParameters,
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::InsufficientReserves { .. } => ErrorKind::InsufficientReserves,
            Self::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::Network { .. } => ErrorKind::NetworkError,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Unknown { .. } => ErrorKind::UnknownError,
        }
    }

    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::NetworkError | ErrorKind::Timeout)
    }
}

/// JSON-RPC transport and query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("RPC endpoint unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Object not found: {object_id}")]
    ObjectNotFound { object_id: String },
}

impl From<RpcError> for Error {
    fn from(err: RpcError) -> Self {
        let message = err.to_string();
        match err {
            RpcError::Timeout { .. } => Self::Timeout {
                message,
                source: Some(err),
            },
            RpcError::Http { status, .. } if status == 401 || status == 403 => {
                Self::Unauthorized {
                    message,
                    source: Some(err),
                }
            }
            RpcError::Unreachable { .. } | RpcError::Http { .. } | RpcError::Rpc { .. } => {
                Self::Network {
                    message,
                    source: Some(err),
                }
            }
            RpcError::ObjectNotFound { .. } => Self::InvalidParameters { message },
            RpcError::Parse(_) => Self::Unknown {
                message,
                source: Some(err),
            },
        }
    }
}

/// Result type alias for vault client operations
pub type Result<T> = std::result::Result<T, Error>;
