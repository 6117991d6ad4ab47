//! The push client itself.

use std::time::Duration;

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("unable to connect to graphite at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to push metric {name}: {source}")]
    Send {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to close graphite connection: {0}")]
    Close(#[source] std::io::Error),
}

/// Graphite client over one TCP connection.
///
/// The stream sits behind an async mutex so concurrent senders cannot
/// interleave partial lines.
#[derive(Debug)]
pub struct Client {
    conn: Mutex<TcpStream>,
    prefix: String,
}

impl Client {
    pub async fn connect(
        host: &str,
        port: u16,
        prefix: impl Into<String>,
    ) -> Result<Self, MetricsError> {
        let addr = format!("{host}:{port}");
        let conn = TcpStream::connect(&addr)
            .await
            .map_err(|source| MetricsError::Connect { addr, source })?;

        Ok(Self {
            conn: Mutex::new(conn),
            prefix: prefix.into(),
        })
    }

    /// Push one metric line: `<prefix>.<name> <value:.2> <unix_ts>\n`.
    pub async fn send(&self, name: &str, value: f64) -> Result<(), MetricsError> {
        let line = format!(
            "{}.{} {:.2} {}\n",
            self.prefix,
            name,
            value,
            Utc::now().timestamp()
        );

        let mut conn = self.conn.lock().await;
        conn.write_all(line.as_bytes())
            .await
            .map_err(|source| MetricsError::Send {
                name: name.to_string(),
                source,
            })
    }

    /// Counter increment (value 1).
    pub async fn incr(&self, name: &str) -> Result<(), MetricsError> {
        self.send(name, 1.0).await
    }

    pub async fn gauge(&self, name: &str, value: f64) -> Result<(), MetricsError> {
        self.send(name, value).await
    }

    /// Timing metric, reported in milliseconds.
    pub async fn timing(&self, name: &str, duration: Duration) -> Result<(), MetricsError> {
        self.send(name, duration.as_millis() as f64).await
    }

    /// Shut the connection down. Sends after this fail.
    pub async fn close(&self) -> Result<(), MetricsError> {
        let mut conn = self.conn.lock().await;
        conn.shutdown().await.map_err(MetricsError::Close)
    }
}
