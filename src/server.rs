use std::net::{Ipv4Addr, UdpSocket};
use std::thread;

use anyhow::{bail, Context};
use tracing::{error, info, trace, warn};

use crate::config::Config;
use crate::dns_message::MAX_MESSAGE_LEN;
use crate::local::{answer_query, Disposition};

/// One byte more than the largest accepted message, so oversized datagrams
/// show up as too large instead of being silently cut to size.
const RECV_BUF_LEN: usize = MAX_MESSAGE_LEN + 1;

/// Captive portal DNS server
pub struct DnsServer {
    socket: UdpSocket,
    address: Ipv4Addr,
}

impl DnsServer {
    /// Bind the listening socket, retrying as configured
    pub fn bind(config: &Config) -> anyhow::Result<Self> {
        let mut attempt: u32 = 0;

        let socket = loop {
            attempt += 1;
            match UdpSocket::bind(config.bind) {
                Ok(socket) => break socket,
                Err(e) => {
                    if config.bind_attempts.is_some_and(|max| attempt >= max) {
                        bail!("failed to bind {} after {} attempts: {}", config.bind, attempt, e);
                    }
                    warn!(bind = %config.bind, attempt, error = %e, "failed to bind socket, retrying");
                    thread::sleep(config.bind_retry);
                }
            }
        };

        Ok(Self::from_socket(socket, config.address))
    }

    pub fn from_socket(socket: UdpSocket, address: Ipv4Addr) -> Self {
        Self { socket, address }
    }

    pub fn local_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        self.socket
            .local_addr()
            .context("failed to read local socket address")
    }

    /// Run the DNS server main loop
    /// A failure on one datagram is logged and the loop moves on
    pub fn run(&self) {
        match self.local_addr() {
            Ok(local) => info!(%local, address = %self.address, "captive portal DNS initiated"),
            Err(e) => warn!(error = %e, "captive portal DNS initiated on unknown address"),
        }

        let mut buf = [0u8; RECV_BUF_LEN];

        loop {
            if let Err(e) = self.serve_once(&mut buf) {
                error!(error = %e, "error handling datagram");
            }
        }
    }

    /// Receive one datagram and answer it if it is an address query
    pub fn serve_once(&self, buf: &mut [u8]) -> anyhow::Result<Disposition> {
        let (size, source) = self
            .socket
            .recv_from(buf)
            .context("failed to receive datagram")?;

        trace!(size, %source, "received datagram");

        let disposition = answer_query(&buf[..size], self.address);

        if let Some(reply) = disposition.reply() {
            trace!(%source, reply = ?reply, "sending reply");
            self.socket
                .send_to(reply, source)
                .with_context(|| format!("failed to send reply to {}", source))?;
        }

        Ok(disposition)
    }
}
