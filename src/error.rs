//! Configuration error types.
//!
//! Parsing option values from strings (for example a decode mode read from an
//! environment variable or a config file) fails with [`ConfigError`].
//!
//! # Example
//!
//! ```rust
//! use resource_client::{ConfigError, QueryParamsDecodeMode};
//!
//! let result = "semicolon".parse::<QueryParamsDecodeMode>();
//! assert!(matches!(result, Err(ConfigError::InvalidDecodeMode { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building resource client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Query decode mode is not recognized.
    #[error("Invalid query decode mode '{mode}'. Expected one of: comma, repeat, brackets, indices.")]
    InvalidDecodeMode {
        /// The unrecognized mode that was provided.
        mode: String,
    },

    /// Body encoding is not recognized.
    #[error("Invalid body encoding '{encoding}'. Expected one of: json, form.")]
    InvalidBodyEncoding {
        /// The unrecognized encoding that was provided.
        encoding: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_decode_mode_error_message() {
        let error = ConfigError::InvalidDecodeMode {
            mode: "semicolon".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("semicolon"));
        assert!(message.contains("brackets"));
    }

    #[test]
    fn test_invalid_body_encoding_error_message() {
        let error = ConfigError::InvalidBodyEncoding {
            encoding: "xml".to_string(),
        };
        assert!(error.to_string().contains("'xml'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidDecodeMode {
            mode: String::new(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
