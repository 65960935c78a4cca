//! Connection settings for an SRM session

use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::Result;

/// Everything needed to reach and log in to a router.
#[derive(Clone)]
pub struct ClientConfig {
    /// Router address, e.g. `192.168.1.1`
    pub host: String,

    /// Management port (SRM serves HTTPS on 8001 and HTTP on 8000)
    pub port: u16,

    /// Use `https` instead of `http`
    pub https: bool,

    pub username: String,

    pub password: String,

    /// Verify the router's TLS certificate
    pub verify_tls: bool,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".to_string(),
            port: 8001,
            https: true,
            username: "admin".to_string(),
            password: String::new(),
            verify_tls: true,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Web API base URL, always ending in `/webapi/`
    pub fn base_url(&self) -> Result<Url> {
        let scheme = if self.https { "https" } else { "http" };
        Ok(Url::parse(&format!(
            "{scheme}://{}:{}/webapi/",
            self.host, self.port
        ))?)
    }
}

// Keep the password out of debug output and logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("https", &self.https)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
