use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Please enter server address!")]
    Empty,
    #[error("Invalid URL format!")]
    Invalid(String),
}

/// Turns user-entered server text into a base URL.
///
/// Trims whitespace and prefixes `http://` unless an `http://` or `https://`
/// scheme (any case) is already present. Empty input stays empty, meaning
/// "not configured".
pub fn normalize_server_address(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Normalizes and validates an address before it is persisted.
pub fn validate_server_address(raw: &str) -> Result<String, AddressError> {
    let normalized = normalize_server_address(raw);
    if normalized.is_empty() {
        return Err(AddressError::Empty);
    }
    let parsed = Url::parse(&normalized).map_err(|err| AddressError::Invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AddressError::Invalid(normalized));
    }
    Ok(normalized)
}

/// Joins a server base address and an endpoint path such as `/api/add`.
pub fn endpoint_url(server_address: &str, endpoint: &str) -> String {
    let base = server_address.strip_suffix('/').unwrap_or(server_address);
    format!("{base}{endpoint}")
}

/// Rewrites a plain `http://` URL to its `https://` variant.
///
/// Returns `None` when the URL is not plain HTTP.
pub fn encrypted_variant(url: &str) -> Option<String> {
    let prefix = url.get(..7)?;
    if prefix.eq_ignore_ascii_case("http://") {
        Some(format!("https://{}", &url[7..]))
    } else {
        None
    }
}

fn has_http_scheme(text: &str) -> bool {
    let lower = text
        .get(..8)
        .unwrap_or(text)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_server_address(""), "");
        assert_eq!(normalize_server_address("   \t"), "");
    }

    #[test]
    fn bare_host_gets_plain_scheme() {
        assert_eq!(normalize_server_address("example.local"), "http://example.local");
        assert_eq!(
            normalize_server_address("  192.168.1.20:5000 "),
            "http://192.168.1.20:5000"
        );
    }

    #[test]
    fn existing_scheme_is_kept_case_insensitively() {
        assert_eq!(normalize_server_address("https://x"), "https://x");
        assert_eq!(normalize_server_address("HTTP://Box.lan"), "HTTP://Box.lan");
    }

    #[test]
    fn validation_rejects_unparseable_addresses() {
        assert_eq!(validate_server_address(""), Err(AddressError::Empty));
        assert!(matches!(
            validate_server_address("http://exa mple"),
            Err(AddressError::Invalid(_))
        ));
        assert_eq!(
            validate_server_address("jukebox.lan:8080").as_deref(),
            Ok("http://jukebox.lan:8080")
        );
    }

    #[test]
    fn endpoint_join_drops_one_trailing_slash() {
        assert_eq!(endpoint_url("http://box/", "/api/add"), "http://box/api/add");
        assert_eq!(endpoint_url("http://box", "/api/add"), "http://box/api/add");
    }

    #[test]
    fn encrypted_variant_only_for_plain_urls() {
        assert_eq!(
            encrypted_variant("http://box:80/api").as_deref(),
            Some("https://box:80/api")
        );
        assert_eq!(encrypted_variant("https://box"), None);
        assert_eq!(encrypted_variant("ftp://box"), None);
    }
}
