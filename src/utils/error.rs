use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No municipalities found at {url}")]
    EmptyResult { url: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    Usage {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or configuration, detected before any request is sent.
    Usage,
    Network,
    /// The fetched pages did not contain what was expected.
    Data,
    System,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::Usage { .. } | ScrapeError::Config { .. } => ErrorCategory::Usage,
            ScrapeError::Transport(_) => ErrorCategory::Network,
            ScrapeError::EmptyResult { .. } => ErrorCategory::Data,
            ScrapeError::Csv(_) | ScrapeError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Data | ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::Transport(e) if e.is_timeout() => {
                format!("Download timed out: {}", e)
            }
            ScrapeError::Transport(e) => format!("Download failed: {}", e),
            ScrapeError::EmptyResult { url } => format!(
                "The page {} does not contain a table of municipalities",
                url
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Usage => {
                "Run with --help to see the expected arguments and options"
            }
            ErrorCategory::Network => {
                "Check the URL and your connection, or raise --timeout"
            }
            ErrorCategory::Data => {
                "Pass the link of a territorial unit page (typically ps32?... under /ps2017nss/)"
            }
            ErrorCategory::System => "Check that the output path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_category() {
        let usage = ScrapeError::Usage {
            field: "listing_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(usage.exit_code(), 1);

        let config = ScrapeError::Config {
            message: "bad toml".to_string(),
        };
        assert_eq!(config.exit_code(), 1);

        let empty = ScrapeError::EmptyResult {
            url: "https://volby.cz/".to_string(),
        };
        assert_eq!(empty.category(), ErrorCategory::Data);
        assert_eq!(empty.exit_code(), 3);

        let io = ScrapeError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn test_empty_result_message_names_url() {
        let err = ScrapeError::EmptyResult {
            url: "https://volby.cz/pls/ps2017nss/ps3".to_string(),
        };
        assert!(err.user_friendly_message().contains("ps3"));
        assert!(err.recovery_suggestion().contains("ps32"));
    }
}
