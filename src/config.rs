use anyhow::Result;
use clap::Parser;

/// Force Viewer - Salesforce OAuth2 account viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Connected App consumer key
    #[arg(long, env = "CONSUMER_KEY")]
    pub consumer_key: Option<String>,

    /// Connected App consumer secret
    #[arg(long, env = "CONSUMER_SECRET")]
    pub consumer_secret: Option<String>,

    /// Salesforce login endpoint
    #[arg(
        long,
        env = "SALESFORCE_LOGIN_URL",
        default_value = "https://login.salesforce.com"
    )]
    pub login_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// HTTP connect timeout in seconds
    #[arg(long, env = "HTTP_CONNECT_TIMEOUT", default_value = "10")]
    pub http_connect_timeout: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value = "30")]
    pub http_request_timeout: u64,
}

/// Connected App credentials. Both values must be present and non-empty
/// for the app to leave setup mode.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl Credentials {
    pub fn new(consumer_key: Option<String>, consumer_secret: Option<String>) -> Self {
        Self {
            consumer_key,
            consumer_secret,
        }
    }

    /// Consumer key, treating an empty string as unset
    pub fn consumer_key(&self) -> Option<&str> {
        self.consumer_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Consumer secret, treating an empty string as unset
    pub fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
    }

    /// Whether the Connected App is fully configured
    pub fn is_configured(&self) -> bool {
        self.consumer_key().is_some() && self.consumer_secret().is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Salesforce Connected App
    pub credentials: Credentials,
    pub login_url: String,

    // HTTP client
    pub http_connect_timeout: u64,
    pub http_request_timeout: u64,

    // Logging
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // Parse CLI arguments
        let args = CliArgs::parse();

        Ok(Config {
            server_host: args.host,
            server_port: args.port,

            // Missing credentials are not an error: the app serves the
            // setup instructions page until both values are provided.
            credentials: Credentials::new(args.consumer_key, args.consumer_secret),

            login_url: normalize_base_url(&args.login_url),

            http_connect_timeout: args.http_connect_timeout,
            http_request_timeout: args.http_request_timeout,

            log_level: args.log_level,
        })
    }
}

/// Strip trailing slashes so endpoint paths can be appended verbatim
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
