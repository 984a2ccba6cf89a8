//! Error types for the directory client
//!
//! Every public API returns `Result<T, Error>`. Variants fall into three
//! families that callers usually care about: configuration problems (raised
//! before any request), authorization/transport failures surfaced from the
//! gateway, and responses whose shape does not match what the client reads.

use thiserror::Error;

/// The main error type for the directory client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Unusable configuration (key file, API root)
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// A required environment variable is unset or empty
    #[error("Environment variable {name} must be set: {hint}")]
    MissingEnvVar {
        /// Variable name
        name: String,
        /// What the variable should hold
        hint: String,
    },

    /// A caller-supplied argument was rejected before any request
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Argument name
        name: String,
        /// Why it was rejected
        message: String,
    },

    /// Local JSON (key file, request body) failed to (de)serialize
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// The service-account assertion could not be signed
    #[error("JWT generation failed: {message}")]
    JwtGeneration {
        /// Signing failure
        message: String,
    },

    /// The token endpoint refused the assertion
    #[error("Token exchange failed: {message}")]
    TokenExchange {
        /// Status and body returned by the endpoint
        message: String,
    },

    // ============================================================================
    // Gateway Errors
    // ============================================================================
    /// 401 or 403 from the directory API
    #[error("Not authorized (HTTP {status}): {body}")]
    Authorization {
        /// HTTP status
        status: u16,
        /// Response body
        body: String,
    },

    /// 404 from the directory API
    #[error("Resource not found: {body}")]
    NotFound {
        /// Response body
        body: String,
    },

    /// Any other non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status
        status: u16,
        /// Response body
        body: String,
    },

    /// Connection or protocol failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No response within the gateway timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Shape Errors
    // ============================================================================
    /// A response does not have the shape the client reads
    #[error("Malformed response at '{field}': {message}")]
    MalformedResponse {
        /// Offending field (`$` for the whole body)
        field: String,
        /// What was found instead
        message: String,
    },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    /// Record batch construction failed
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet encoding failed
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Results could not be written in the requested format
    #[error("Output error: {message}")]
    Output {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem or stream failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else
    #[error("{0}")]
    Other(String),

    /// Error raised by application code through `anyhow`
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingEnvVar {
            name: name.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to the matching gateway error
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::Authorization { status, body },
            404 => Self::NotFound { body },
            _ => Self::HttpStatus { status, body },
        }
    }

    /// Raised before any network activity
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::MissingEnvVar { .. } | Error::InvalidArgument { .. }
        )
    }

    /// Credential or permission failure
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Error::Authorization { .. }
                | Error::JwtGeneration { .. }
                | Error::TokenExchange { .. }
        )
    }

    /// Failure while talking to the remote service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Timeout { .. } | Error::HttpStatus { .. }
        )
    }
}

/// Result type alias for the directory client
pub type Result<T> = std::result::Result<T, Error>;
