//! Error Types
//!
//! Failures surfaced by the API client, clipboard access and configuration.

use std::fmt;

/// HTTP status the backend uses when the hidden-content session has lapsed
pub const SESSION_EXPIRED_STATUS: u16 = 403;

/// Common result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// API request failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    Network(String),
    /// Non-2xx response; `message` is the backend's `error` field when present
    Http { status: u16, message: Option<String> },
    /// A 2xx response whose body did not have the expected shape
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A 403 means authorization for hidden content is gone
    pub fn is_session_expired(&self) -> bool {
        self.status() == Some(SESSION_EXPIRED_STATUS)
    }

    /// The message the backend put in its error envelope, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(_) => write!(f, "Unexpected error during API request."),
            ApiError::Http { message: Some(msg), .. } => write!(f, "{}", msg),
            ApiError::Http { status, message: None } => write!(f, "HTTP error! status: {}", status),
            ApiError::Decode(msg) => write!(f, "Invalid response from server: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// OS clipboard read failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard read capability in this environment
    Unsupported,
    /// The read was attempted and rejected (usually a permission denial)
    Read(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unsupported => {
                write!(f, "Clipboard API not supported or permission denied.")
            }
            ClipboardError::Read(msg) => write!(
                f,
                "Failed to read clipboard: {}. Ensure you have granted permission.",
                msg
            ),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Failures of the paste-into-clipboard-note flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteError {
    MissingClipboardNote,
    EmptyClipboard,
    Clipboard(ClipboardError),
    Api(ApiError),
}

impl fmt::Display for PasteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteError::MissingClipboardNote => {
                write!(f, "Clipboard note not found. Please refresh the page.")
            }
            PasteError::EmptyClipboard => write!(f, "Clipboard is empty. Nothing to paste."),
            PasteError::Clipboard(err) => write!(f, "{}", err),
            PasteError::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PasteError {}

/// Invalid client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    InvalidInterval(&'static str),
    Client(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl(msg) => write!(f, "Invalid base URL: {}", msg),
            ConfigError::InvalidInterval(name) => write!(f, "{} must be greater than zero", name),
            ConfigError::Client(msg) => write!(f, "Failed to build HTTP client: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Selection keys that are not of the form `<type>-<id>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Malformed(String),
    UnknownType(String),
    InvalidId(String),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::Malformed(raw) => write!(f, "Malformed content key: {}", raw),
            KeyParseError::UnknownType(kind) => write!(f, "Unknown content type: {}", kind),
            KeyParseError::InvalidId(id) => write!(f, "Invalid content id: {}", id),
        }
    }
}

impl std::error::Error for KeyParseError {}
