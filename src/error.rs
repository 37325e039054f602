//! Error types for the ECO Mane telemetry poller.
//!
//! Errors are layered the same way the poller is: parsing problems inside a
//! single document ([`ParseError`]), device communication ([`EcomaneError`]),
//! and a failed poll cycle annotated with the stage that broke
//! ([`CycleError`]). Every cycle error collapses onto one of three
//! [`ErrorKind`]s for callers that only care about the category.

use std::fmt;
use thiserror::Error;

/// Coarse classification of any failure that can end a poll cycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Connection failure, timeout or non-success HTTP status
    Transport,
    /// An expected element or field is absent from the document
    MalformedDocument,
    /// An extracted string does not convert to the expected number
    NumericParse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::MalformedDocument => write!(f, "malformed_document"),
            ErrorKind::NumericParse => write!(f, "numeric_parse"),
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Device communication and parsing errors.
#[derive(Error, Debug)]
pub enum EcomaneError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a non-success status
    #[error("server error (status {status}) for {url}")]
    ServerError { status: u16, url: String },

    /// Request did not complete within the configured timeout
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// HTML parsing failed
    #[error("HTML parsing error")]
    Parse(#[from] ParseError),
}

/// HTML parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Element not found in HTML
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Failed to parse numeric value
    #[error("failed to parse number from '{text}': {message}")]
    NumberParse { text: String, message: String },

    /// Text did not contain the expected marker/terminator pair
    #[error("marker '{marker}' not found in '{text}'")]
    MarkerNotFound { marker: String, text: String },
}

/// A poll cycle failed. The variant names the stage that failed.
#[derive(Error, Debug)]
pub enum CycleError {
    /// The usage ("today") page could not be fetched or parsed
    #[error("usage page failed")]
    Usage(#[source] EcomaneError),

    /// A circuit list page could not be fetched or parsed
    #[error("circuit page {page} failed")]
    CircuitPage {
        page: u32,
        #[source]
        source: EcomaneError,
    },

    /// The energy sub-fetch of one circuit failed
    #[error("energy fetch for circuit {index} (page {page}) failed")]
    CircuitEnergy {
        index: usize,
        page: u32,
        #[source]
        source: EcomaneError,
    },

    /// The device kept announcing more pages than the hard cap allows
    #[error("circuit scan exceeded {max_pages} pages")]
    PageLimitExceeded { max_pages: u32 },
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Client(#[from] influxdb2::RequestError),

    /// Invalid data point
    #[error("invalid data point: {0}")]
    InvalidDataPoint(String),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl EcomaneError {
    /// Creates a server error from an HTTP status and the requested URL.
    pub fn server_error(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::ServerError {
            status: status.as_u16(),
            url: url.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EcomaneError::Http(_) | EcomaneError::ServerError { .. } | EcomaneError::Timeout(_) => {
                ErrorKind::Transport
            }
            EcomaneError::Parse(parse) => parse.kind(),
        }
    }
}

impl ParseError {
    /// Creates an element not found error.
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }

    /// Creates a number parse error.
    pub fn number_parse(text: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::NumberParse {
            text: text.into(),
            message: err.to_string(),
        }
    }

    /// Creates a marker not found error.
    pub fn marker_not_found(marker: impl Into<String>, text: impl Into<String>) -> Self {
        Self::MarkerNotFound {
            marker: marker.into(),
            text: text.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::NumberParse { .. } => ErrorKind::NumericParse,
            _ => ErrorKind::MalformedDocument,
        }
    }
}

impl CycleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CycleError::Usage(source)
            | CycleError::CircuitPage { source, .. }
            | CycleError::CircuitEnergy { source, .. } => source.kind(),
            CycleError::PageLimitExceeded { .. } => ErrorKind::MalformedDocument,
        }
    }
}
