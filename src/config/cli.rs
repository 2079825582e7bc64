//! Command-line options.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{DEFAULT_MAX_CONCURRENCY, DEFAULT_WHOAPI_ENDPOINT, WHOAPI_KEY_ENV};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Single domain
/// mail_spoof -d example.com
///
/// # A list of domains, results to a file, custom resolver
/// mail_spoof -i domains.txt -o results.json -s 1.1.1.1 -s 9.9.9.9
///
/// # With registration checks
/// WHOAPI_KEY=... mail_spoof -d example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mail_spoof",
    version,
    about = "Scans SPF and DMARC records for issues that could allow email spoofing"
)]
pub struct Opt {
    /// A target domain to check, can be passed multiple times
    #[arg(short = 'd', long = "domain")]
    pub domains: Vec<String>,

    /// File listing domains to check, one per line
    #[arg(short = 'i', long = "input-list", visible_alias = "iL")]
    pub input_list: Option<PathBuf>,

    /// JSON output file, `-` for stdout
    #[arg(short = 'o', long, default_value = "-")]
    pub output: PathBuf,

    /// Timeout in seconds for DNS and HTTP requests
    #[arg(short = 't', long, default_value_t = 5.0)]
    pub timeout: f64,

    /// Nameserver to use, can be passed multiple times
    #[arg(short = 's', long = "nameserver")]
    pub nameservers: Vec<IpAddr>,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum domains scanned concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// WhoAPI key used to check whether SPF dependencies are registered
    #[arg(long, env = WHOAPI_KEY_ENV, hide_env_values = true)]
    pub whoapi_key: Option<String>,

    /// WhoAPI endpoint
    #[arg(long, default_value = DEFAULT_WHOAPI_ENDPOINT, hide = true)]
    pub whoapi_endpoint: String,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let log_level = if opt.verbose && opt.log_level == LogLevel::Info {
            LogLevel::Debug
        } else {
            opt.log_level
        };

        Config {
            domains: opt.domains,
            input_list: opt.input_list,
            output: opt.output,
            timeout_secs: opt.timeout,
            nameservers: opt.nameservers,
            max_concurrency: opt.max_concurrency,
            log_level,
            log_format: opt.log_format,
            whoapi_key: opt.whoapi_key.filter(|key| !key.trim().is_empty()),
            whoapi_endpoint: opt.whoapi_endpoint,
        }
    }
}
