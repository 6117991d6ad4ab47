//! Command-line configuration.
//!
//! Every runtime setting arrives as a flag. There are no configuration
//! files and no environment lookups, so a process is fully described by
//! its command line.

use clap::Parser;
use marquee_jsonlog::Level;

#[derive(Debug, Clone, Parser)]
#[command(name = "marquee-api", about = "JSON API serving the Marquee movie catalog")]
pub struct Config {
    /// Port the API listens on.
    #[arg(long, default_value_t = 4000)]
    pub port: u16,

    /// Environment name echoed by the healthcheck (development|staging|production).
    #[arg(long, default_value = "development")]
    pub env: String,

    /// Minimum severity a log entry needs before it is written (info|error|fatal|off).
    #[arg(long, default_value = "info")]
    pub log_level: Level,

    /// Origin allowed to make cross-origin requests. Repeatable.
    #[arg(long = "cors-trusted-origin", value_name = "ORIGIN")]
    pub cors_trusted_origins: Vec<String>,

    /// Graphite host. Metrics are pushed only when this is set.
    #[arg(long)]
    pub graphite_host: Option<String>,

    /// Graphite plaintext protocol port.
    #[arg(long, default_value_t = 2003)]
    pub graphite_port: u16,

    /// Prefix prepended to every metric name pushed to Graphite.
    #[arg(long, default_value = "marquee.api")]
    pub graphite_prefix: String,
}
