use serde::{Deserialize, Serialize};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3770.142 Safari/537.36";

const DEFAULT_REFERRER: &str = "http://www.google.com";

/// 30 seconds
const DEFAULT_TIMEOUT_MS: u64 = 30 * 1000;

/// Transport options for a single fetch.
///
/// A plain value: build one and pass it by reference into each call. Nothing
/// holds onto it between calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header sent with the request.
    #[serde(default = "default_referrer")]
    pub referrer: String,

    /// Request timeout in milliseconds. 0 disables the timeout entirely.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Accept the response no matter what its Content-Type header says.
    #[serde(default = "default_ignore_content_type")]
    pub ignore_content_type: bool,

    /// Read the body even when the response status is not a success.
    #[serde(default)]
    pub ignore_http_errors: bool,

    /// Follow server redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Validate TLS certificates and hostnames. Turning this off resolves
    /// handshake failures against badly-configured hosts.
    #[serde(default = "default_validate_tls")]
    pub validate_tls_certificates: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            referrer: default_referrer(),
            timeout_ms: default_timeout_ms(),
            ignore_content_type: default_ignore_content_type(),
            ignore_http_errors: false,
            follow_redirects: default_follow_redirects(),
            validate_tls_certificates: default_validate_tls(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_referrer() -> String {
    DEFAULT_REFERRER.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_ignore_content_type() -> bool {
    true
}

fn default_follow_redirects() -> bool {
    true
}

fn default_validate_tls() -> bool {
    true
}

impl FetchConfig {
    /// Parse a YAML config. Missing fields fall back to their defaults, so a
    /// file may set only the options it cares about.
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(s)
    }
}
