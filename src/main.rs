mod config;
mod dns_header;
mod dns_message;
mod dns_question_and_answer;
mod error;
mod local;
mod server;
mod wire;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Args, Config};
use server::DnsServer;

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = Config::from(&args);
    info!(bind = %config.bind, address = %config.address, "starting captive portal DNS");

    let server = DnsServer::bind(&config)?;
    server.run();

    Ok(())
}
