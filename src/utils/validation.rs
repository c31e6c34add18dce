use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::Usage {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// The field delimiter must be a single ASCII byte that cannot be confused
/// with quoting or record boundaries.
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    let reason = if !delimiter.is_ascii() {
        Some("Delimiter must be an ASCII character")
    } else if matches!(delimiter, '"' | '\r' | '\n') {
        Some("Delimiter cannot be a quote or line break")
    } else if delimiter.is_ascii_alphanumeric() {
        Some("Delimiter cannot be a letter or digit")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ScrapeError::Usage {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("listing_url", "https://volby.cz/pls/ps2017nss/ps32").is_ok());
        assert!(validate_url("listing_url", "http://example.com").is_ok());
        assert!(validate_url("listing_url", "").is_err());
        assert!(validate_url("listing_url", "invalid-url").is_err());
        assert!(validate_url("listing_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "results.csv").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 20, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter("delimiter", ',').is_ok());
        assert!(validate_delimiter("delimiter", ';').is_ok());
        assert!(validate_delimiter("delimiter", '\t').is_ok());
        assert!(validate_delimiter("delimiter", '"').is_err());
        assert!(validate_delimiter("delimiter", '\n').is_err());
        assert!(validate_delimiter("delimiter", 'a').is_err());
        assert!(validate_delimiter("delimiter", '§').is_err());
    }
}
