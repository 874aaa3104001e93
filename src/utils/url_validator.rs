//! Destination URL validation.
//!
//! URLs are stored exactly as submitted; this module only decides whether a
//! value is acceptable as a redirect target.

use std::borrow::Cow;
use url::Url;
use validator::ValidationError;

/// Maximum accepted URL length (schema limit).
pub const MAX_URL_LENGTH: usize = 2048;

/// Schemes accepted as redirect targets.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not exceed {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP, HTTPS and FTP URLs are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute URL usable as a redirect target.
///
/// # Rules
///
/// - At most [`MAX_URL_LENGTH`] characters
/// - Parses as an absolute URL
/// - Scheme is `http`, `https` or `ftp`
/// - Has a non-empty host
///
/// # Errors
///
/// Returns the first rule that fails as a [`UrlValidationError`].
pub fn check_destination_url(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// `validator` adapter for [`check_destination_url`].
pub fn validate_destination_url(value: &str) -> Result<(), ValidationError> {
    check_destination_url(value).map_err(|e| {
        let message = match e {
            UrlValidationError::TooLong => e.to_string(),
            _ => "Please provide a valid URL".to_string(),
        };
        ValidationError::new("url").with_message(Cow::Owned(message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(check_destination_url("http://example.com").is_ok());
        assert!(check_destination_url("https://example.com/path?q=1#frag").is_ok());
        assert!(check_destination_url("ftp://files.example.com/a.txt").is_ok());
    }

    #[test]
    fn test_rejects_relative_url() {
        let result = check_destination_url("not-a-url");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert_eq!(
            check_destination_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            check_destination_url("data:text/html,hi"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            check_destination_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_rejects_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(check_destination_url(&long), Err(UrlValidationError::TooLong));
    }

    #[test]
    fn test_accepts_exact_max_length() {
        let prefix = "https://example.com/";
        let url = format!("{prefix}{}", "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert_eq!(url.len(), MAX_URL_LENGTH);
        assert!(check_destination_url(&url).is_ok());
    }

    #[test]
    fn test_validator_adapter_message() {
        let err = validate_destination_url("nope").unwrap_err();
        assert_eq!(err.code, "url");
        assert_eq!(err.message.as_deref(), Some("Please provide a valid URL"));
    }
}
