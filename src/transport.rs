use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 20;

/// Settings for the shared [`Transport`].
///
/// Every timeout is its own field. They all start out as [`DEFAULT_TIMEOUT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    /// The handshake happens inside the connect phase, so this is added on top of
    /// `connect_timeout` rather than enforced on its own.
    pub tls_handshake_timeout: Duration,
    /// Ceiling for the whole round trip, body included
    pub request_timeout: Duration,
    pub max_idle_per_host: usize,
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            tls_handshake_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
            pool_idle_timeout: None,
        }
    }
}

impl TransportConfig {
    /// Use `timeout` for every phase.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: timeout,
            tls_handshake_timeout: timeout,
            request_timeout: timeout,
            ..Self::default()
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn tls_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.tls_handshake_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    fn effective_connect_timeout(&self) -> Duration {
        self.connect_timeout.saturating_add(self.tls_handshake_timeout)
    }
}

/// The pooled HTTP client every request goes through.
///
/// Cloning is cheap and clones share the same connection pool, so build one per application and
/// hand it to each [`Executor`](crate::Executor).
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: TransportConfig,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let builder = Client::builder()
            .connect_timeout(config.effective_connect_timeout())
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout);
        Ok(Self {
            client: build_client(builder)?,
            config,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

/// A builder that cannot produce a client is a configuration problem, not a transport one.
fn build_client(builder: ClientBuilder) -> Result<Client> {
    builder.build().map_err(Error::Client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_share_one_timeout() {
        let config = TransportConfig::default();
        assert_eq!(config.connect_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.tls_handshake_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_idle_per_host, 20);
    }

    #[test]
    fn timeouts_are_set_independently() {
        let config = TransportConfig::default()
            .connect_timeout(Duration::from_millis(100))
            .request_timeout(Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_millis(100));
        assert_eq!(config.tls_handshake_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn handshake_extends_connect_phase() {
        let config = TransportConfig::with_timeout(Duration::from_millis(250));
        assert_eq!(config.effective_connect_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn builder_failure_is_a_client_error() {
        let builder = Client::builder()
            .min_tls_version(reqwest::tls::Version::TLS_1_3)
            .max_tls_version(reqwest::tls::Version::TLS_1_2);
        let err = build_client(builder).unwrap_err();
        assert!(matches!(err, Error::Client(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn builds_client() {
        let transport = Transport::new(TransportConfig::default()).unwrap();
        assert_eq!(transport.config(), &TransportConfig::default());
    }
}
