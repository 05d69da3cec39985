use anyhow::Context;
use clap::Parser;
use pagemeta::FetchConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Page URL to fetch
    pub url: String,

    /// Read fetch options from a YAML file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// User-Agent header sent with the request
    #[clap(long)]
    pub user_agent: Option<String>,

    /// Referer header sent with the request
    #[clap(long)]
    pub referrer: Option<String>,

    /// Request timeout in milliseconds, 0 waits forever
    #[clap(long)]
    pub timeout_ms: Option<u64>,

    /// Fail on responses that are not HTML
    #[clap(long, default_value = "false")]
    pub strict_content_type: bool,

    /// Extract from error pages instead of failing on the HTTP status
    #[clap(long, default_value = "false")]
    pub ignore_http_errors: bool,

    /// Do not follow redirects
    #[clap(long, default_value = "false")]
    pub no_redirects: bool,

    /// Accept invalid TLS certificates
    #[clap(long, default_value = "false")]
    pub insecure: bool,
}

impl Args {
    /// Assemble the fetch options: the YAML file when given, defaults
    /// otherwise, with command line flags applied on top.
    pub fn fetch_config(&self) -> anyhow::Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                FetchConfig::from_yaml_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => FetchConfig::default(),
        };

        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(referrer) = &self.referrer {
            config.referrer = referrer.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if self.strict_content_type {
            config.ignore_content_type = false;
        }
        if self.ignore_http_errors {
            config.ignore_http_errors = true;
        }
        if self.no_redirects {
            config.follow_redirects = false;
        }
        if self.insecure {
            config.validate_tls_certificates = false;
        }

        Ok(config)
    }
}
