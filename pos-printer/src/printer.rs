//! Network printer adapter (raw TCP, port 9100)

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Raw printing port used by most thermal printers
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn send(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is reachable
    async fn is_online(&self) -> bool;
}

/// Thermal receipt printer on the local network
#[derive(Debug, Clone)]
pub struct ThermalPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl ThermalPrinter {
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{host}:{port}"))
    }

    /// Parse `host:port`; a bare IP uses [`DEFAULT_PORT`]
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr.trim();
        let parsed = addr
            .parse::<SocketAddr>()
            .or_else(|_| format!("{addr}:{DEFAULT_PORT}").parse::<SocketAddr>())
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {addr}")))?;

        Ok(Self {
            addr: parsed,
            timeout: Duration::from_secs(5),
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for ThermalPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn send(&self, data: &[u8]) -> PrintResult<()> {
        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        stream.write_all(data).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print job sent");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}
