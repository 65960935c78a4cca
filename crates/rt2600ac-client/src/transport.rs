//! HTTP transport construction
//!
//! Routers ship with self-signed certificates, so verification can be
//! switched off per session. reqwest is built without a bundled crypto
//! provider; the ring provider is installed on first use.

use reqwest::{Client, ClientBuilder};
use std::sync::Once;

use crate::config::ClientConfig;
use crate::error::Result;

static CRYPTO_PROVIDER: Once = Once::new();

/// Install the ring rustls provider for the process.
///
/// Safe to call repeatedly. If another provider was installed first it is
/// left in place.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Build the reqwest client for a session
pub fn build_http_client(config: &ClientConfig, verify_tls: bool) -> Result<Client> {
    ensure_crypto_provider();

    if !verify_tls {
        tracing::debug!(
            "TLS certificate verification disabled for {}",
            config.host
        );
    }

    ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .danger_accept_invalid_certs(!verify_tls)
        .user_agent(concat!("rt2600ac-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Into::into)
}
