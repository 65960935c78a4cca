//! Error types for SRM API operations

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status: {0}")]
    HttpStatus(StatusCode),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The router answered with `success: false`
    #[error("API error {code}: {message}")]
    Api { code: i64, message: &'static str },

    /// Login was rejected
    #[error("Authentication failed ({code}): {message}")]
    Auth { code: i64, message: &'static str },
}

impl Error {
    /// Build an API error from a router error code
    pub fn api(code: i64) -> Self {
        Self::Api {
            code,
            message: describe_code(code),
        }
    }

    /// Build an authentication error from a router error code
    pub fn auth(code: i64) -> Self {
        Self::Auth {
            code,
            message: describe_code(code),
        }
    }

    /// Router error code carried by this error, if any
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } | Self::Auth { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Human readable text for a Synology web API error code.
pub fn describe_code(code: i64) -> &'static str {
    match code {
        100 => "Unknown error",
        101 => "Invalid parameter",
        102 => "The requested API does not exist",
        103 => "The requested method does not exist",
        104 => "The requested version does not support the functionality",
        105 => "The logged in session does not have permission",
        106 => "Session timeout",
        107 => "Session interrupted by duplicate login",
        119 => "SID not found",
        400 => "No such account or incorrect password",
        401 => "Account disabled",
        402 => "Permission denied",
        403 => "2-step verification code required",
        404 => "Failed to authenticate 2-step verification code",
        _ => "Unrecognized error code",
    }
}

pub type Result<T> = std::result::Result<T, Error>;
