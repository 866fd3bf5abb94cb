use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "captive-dns")]
#[command(about = "Answers every DNS address query with the captive portal address")]
pub struct Args {
    /// Address to listen on for DNS queries
    #[arg(long, default_value = "0.0.0.0:53")]
    pub bind: SocketAddr,

    /// IPv4 address returned for every address query (the portal gateway)
    #[arg(long, default_value = "192.168.4.1")]
    pub address: Ipv4Addr,

    /// Milliseconds to wait between attempts to bind the socket
    #[arg(long, default_value_t = 1000)]
    pub bind_retry_ms: u64,

    /// Bind attempts before giving up (0 retries forever)
    #[arg(long, default_value_t = 0)]
    pub bind_attempts: u32,

    /// Log filter (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Runtime settings for the responder.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub address: Ipv4Addr,
    pub bind_retry: Duration,
    pub bind_attempts: Option<u32>,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            bind: args.bind,
            address: args.address,
            bind_retry: Duration::from_millis(args.bind_retry_ms),
            bind_attempts: (args.bind_attempts > 0).then_some(args.bind_attempts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["captive-dns"]);
        let config = Config::from(&args);

        assert_eq!(config.bind, "0.0.0.0:53".parse().unwrap());
        assert_eq!(config.address, Ipv4Addr::new(192, 168, 4, 1));
        assert_eq!(config.bind_retry, Duration::from_secs(1));
        assert_eq!(config.bind_attempts, None);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "captive-dns",
            "--bind",
            "127.0.0.1:5353",
            "--address",
            "10.0.0.1",
            "--bind-retry-ms",
            "250",
            "--bind-attempts",
            "3",
            "--log-level",
            "debug",
        ]);
        let config = Config::from(&args);

        assert_eq!(config.bind.port(), 5353);
        assert_eq!(config.address, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(config.bind_retry, Duration::from_millis(250));
        assert_eq!(config.bind_attempts, Some(3));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
