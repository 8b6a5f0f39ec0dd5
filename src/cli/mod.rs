//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::api::{Client, RequestSnapshot, ResponseSnapshot};
use crate::config::Settings;
use crate::errors::Result;

/// Production service root; `/api/v1` is appended for API calls.
pub const DEFAULT_HOST: &str = "https://onetimesecret.com";

/// Onetimesecret CLI: create and send one-time secrets.
#[derive(Parser)]
#[command(
    name = "ots",
    about = "Create and send secrets through onetimesecret.com",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Username for the service (overrides the config file)
    #[arg(long, global = true, env = "OTS_USERNAME")]
    pub username: Option<String>,

    /// API token for the service (overrides the config file)
    #[arg(long, global = true, env = "OTS_APITOKEN")]
    pub apitoken: Option<String>,

    /// Path to the configuration file (default: ~/.onetimesecret.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Service root, for self-hosted instances
    #[arg(long, global = true, env = "OTS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Dump request and response traffic to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a secret (the service generates one if no value is given)
    Create {
        /// Send a secret with this value
        #[arg(long)]
        value: Option<String>,

        /// Email a link to the secret (never the secret itself) to this address
        #[arg(long)]
        email: Option<String>,

        /// Expire the secret after this many seconds
        #[arg(long)]
        ttl: Option<u64>,

        /// Require this passphrase to retrieve the secret
        #[arg(long)]
        passphrase: Option<String>,
    },

    /// View metadata about one or more secrets
    Inspect {
        /// Private metadata keys (not the shareable secret keys)
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve identity and build a client against the selected host.
///
/// Identity precedence: command-line flag, then environment variable
/// (clap binds `OTS_USERNAME`/`OTS_APITOKEN`), then the config file.
/// Credentials are only attached when both fields resolve to non-empty
/// values; anything less yields an anonymous client.
pub fn build_client(cli: &Cli) -> Result<Client> {
    let settings = Settings::load(cli.config.as_deref())?;

    let username = cli
        .username
        .clone()
        .or(settings.username)
        .unwrap_or_default();
    let apitoken = cli
        .apitoken
        .clone()
        .or(settings.apitoken)
        .unwrap_or_default();

    let mut client = if username.is_empty() || apitoken.is_empty() {
        Client::new()
    } else {
        Client::with_credentials(username, apitoken)
    };
    client = client.base_url(api_base(&cli.host));

    if cli.verbose {
        client = client
            .on_request(Arc::new(|req: &RequestSnapshot| {
                eprintln!("> POST {}", req.url);
                for (key, value) in &req.params {
                    eprintln!(">   {key}={value}");
                }
            }))
            .on_response(Arc::new(|resp: &ResponseSnapshot| {
                eprintln!("< {} {}", resp.status, resp.body);
            }));
    }

    Ok(client)
}

/// API base for a service root, e.g. `https://onetimesecret.com/api/v1`.
pub fn api_base(host: &str) -> String {
    format!("{}/api/v1", host.trim_end_matches('/'))
}

/// Shareable web link for a secret key.
pub fn secret_url(host: &str, secret_key: &str) -> String {
    format!("{}/secret/{secret_key}", host.trim_end_matches('/'))
}
