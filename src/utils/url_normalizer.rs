//! URL normalization and sanitization utilities.
//!
//! Canonical URLs are the platform's deduplication key, so every URL that
//! enters an alias set goes through the same normal form: lowercase hostname,
//! no fragment, no default port, http(s) only.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Hostname**: Converted to lowercase
/// 3. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: Removed (e.g., `#section`)
/// 5. **Query parameters**: Preserved as-is
/// 6. **Path**: Preserved with case sensitivity
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S)
/// schemes (`javascript:`, `data:`, `file:`, ...).
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple_http() {
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com/");
    }

    #[test]
    fn test_normalize_uppercase_host() {
        assert_eq!(
            normalize_url("https://EXAMPLE.COM/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_remove_default_ports() {
        assert_eq!(
            normalize_url("http://example.com:80/path").unwrap(),
            "http://example.com/path"
        );
        assert_eq!(
            normalize_url("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_keep_custom_port() {
        assert_eq!(
            normalize_url("http://example.com:8080/path").unwrap(),
            "http://example.com:8080/path"
        );
    }

    #[test]
    fn test_normalize_remove_fragment() {
        assert_eq!(
            normalize_url("https://example.com/page#section").unwrap(),
            "https://example.com/page"
        );
        assert_eq!(
            normalize_url("https://example.com/page?key=value#section").unwrap(),
            "https://example.com/page?key=value"
        );
    }

    #[test]
    fn test_normalize_preserve_query_params() {
        assert_eq!(
            normalize_url("https://example.com/search?q=rust&lang=en").unwrap(),
            "https://example.com/search?q=rust&lang=en"
        );
    }

    #[test]
    fn test_normalize_path_case_preserved() {
        assert_eq!(
            normalize_url("HTTPS://EXAMPLE.COM:443/Path?key=VALUE#anchor").unwrap(),
            "https://example.com/Path?key=VALUE"
        );
    }

    #[test]
    fn test_normalize_invalid_url() {
        assert!(matches!(
            normalize_url("not a valid url").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
        assert!(matches!(
            normalize_url("").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
        assert!(matches!(
            normalize_url("example.com").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_rejects_dangerous_protocols() {
        for input in [
            "ftp://example.com/file.txt",
            "file:///home/user/document.txt",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
        ] {
            assert!(matches!(
                normalize_url(input).unwrap_err(),
                UrlNormalizationError::UnsupportedProtocol
            ));
        }
    }

    #[test]
    fn test_normalize_encoded_characters_preserved() {
        assert!(
            normalize_url("https://example.com/path%20with%20spaces")
                .unwrap()
                .contains("path%20with%20spaces")
        );
    }

    #[test]
    fn test_normalize_ip_and_localhost() {
        assert_eq!(
            normalize_url("http://192.168.1.1:8080/api").unwrap(),
            "http://192.168.1.1:8080/api"
        );
        assert_eq!(
            normalize_url("http://localhost:3000/test").unwrap(),
            "http://localhost:3000/test"
        );
    }
}
