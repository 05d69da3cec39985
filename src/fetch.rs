//! Blocking HTTP transport for fetching pages before extraction.

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use reqwest::header::{CONTENT_TYPE, REFERER};
use reqwest::redirect::Policy;
use std::time::Duration;

const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// A fetched document body together with the URL it finally came from.
/// `final_url` reflects any redirects and anchors relative image sources
/// during extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: String,
}

/// Fetch `url` according to `config` and return its body.
///
/// The URL must be non-empty, parseable and http(s); anything else is
/// rejected as [`Error::InvalidUrl`] before any network activity. Transport
/// failures, refused statuses (unless `ignore_http_errors`) and rejected
/// content types (unless `ignore_content_type`) surface as errors, as does
/// a body with no content at all.
pub fn fetch_page(url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::InvalidUrl("empty url".to_string()));
    }
    let url_parsed = reqwest::Url::parse(url)
        .map_err(|err| Error::InvalidUrl(format!("{url}: {err}")))?;
    if !matches!(url_parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{url}: unsupported scheme '{}'",
            url_parsed.scheme()
        )));
    }

    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(&config.user_agent)
        .redirect(if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        })
        .danger_accept_invalid_certs(!config.validate_tls_certificates)
        .danger_accept_invalid_hostnames(!config.validate_tls_certificates);

    // timeout_ms == 0 means wait forever
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    let client = builder.build()?;

    log::debug!("{url}: requesting");

    let response = client
        .get(url_parsed)
        .header(REFERER, &config.referrer)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        log::debug!("{url}: {status}");
    }
    let response = if config.ignore_http_errors {
        response
    } else {
        response.error_for_status()?
    };

    if !config.ignore_content_type {
        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_html_content_type(content_type) {
                return Err(Error::UnsupportedContentType {
                    content_type: content_type.to_string(),
                    url: response.url().to_string(),
                });
            }
        }
    }

    let final_url = response.url().to_string();
    let html = response.text()?;
    if html.trim().is_empty() {
        return Err(Error::EmptyDocument(final_url));
    }

    Ok(FetchedPage { html, final_url })
}

fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    HTML_CONTENT_TYPES
        .iter()
        .any(|accepted| content_type.starts_with(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_rejected_before_any_request() {
        let config = FetchConfig::default();
        for url in ["", "   ", "\t\n"] {
            match fetch_page(url, &config) {
                Err(Error::InvalidUrl(msg)) => assert_eq!(msg, "empty url"),
                other => panic!("expected InvalidUrl, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unparseable_url_is_rejected() {
        let config = FetchConfig::default();
        let result = fetch_page("not a url at all", &config);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let config = FetchConfig::default();
        for url in ["ftp://example.com/file", "file:///etc/hosts", "mailto:a@b.c"] {
            let result = fetch_page(url, &config);
            assert!(matches!(result, Err(Error::InvalidUrl(_))), "{url} passed");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed_before_policy() {
        let config = FetchConfig::default();
        // trims to a well-formed URL, so rejection happens on the scheme,
        // not on parsing
        match fetch_page("  ftp://example.com  ", &config) {
            Err(Error::InvalidUrl(msg)) => assert!(msg.contains("unsupported scheme")),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("Text/HTML; charset=ISO-8859-1"));
        assert!(is_html_content_type("application/xhtml+xml"));

        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type("image/png"));
        assert!(!is_html_content_type("text/plain"));
        assert!(!is_html_content_type(""));
    }
}
