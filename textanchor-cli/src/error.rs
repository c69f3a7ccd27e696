//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Input file with unexpected content
    InvalidInput(String),
    /// Error reported by the library
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<textanchor_api::ApiError> for CliError {
    fn from(err: textanchor_api::ApiError) -> Self {
        match err {
            textanchor_api::ApiError::Config(msg) => CliError::ConfigError(msg),
            textanchor_api::ApiError::Toml(err) => CliError::ConfigError(err.to_string()),
            other => CliError::ProcessingError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use textanchor_api::ApiError;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("test.txt".to_string()).to_string(),
            "File not found: test.txt"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("invalid format".to_string()).to_string(),
            "Configuration error: invalid format"
        );
        assert_eq!(
            CliError::InvalidInput("expected an array".to_string()).to_string(),
            "Invalid input: expected an array"
        );
    }

    #[test]
    fn test_api_errors_are_classified() {
        let err: CliError = ApiError::Config("bad threshold".to_string()).into();
        assert!(matches!(err, CliError::ConfigError(_)));

        let err: CliError = ApiError::Query("missing total".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Processing error: invalid query: missing total"
        );
    }

    #[test]
    fn test_error_with_special_characters() {
        let error = CliError::FileNotFound("ファイル/test 文件.txt".to_string());
        assert_eq!(error.to_string(), "File not found: ファイル/test 文件.txt");
    }

    #[test]
    fn test_cli_result_type_alias() {
        let failure: CliResult<String> = Err(anyhow::anyhow!("test error"));
        assert!(failure.unwrap_err().to_string().contains("test error"));
    }
}
