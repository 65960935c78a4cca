//! HTTP session against an SRM router

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::RouterApi;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{AUTH_ENDPOINT, ApiRequest};
use crate::response::decode_envelope;
use crate::transport::build_http_client;

pub const API_AUTH: &str = "SYNO.API.Auth";

/// A session bound to one router.
///
/// Construction does no I/O. The first restricted call logs in and caches
/// the session id for every later call.
pub struct SrmClient {
    config: ClientConfig,
    base_url: Url,
    http: Client,
    sid: Mutex<Option<String>>,
}

impl SrmClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = build_http_client(&config, config.verify_tls)?;
        Ok(Self {
            config,
            base_url,
            http,
            sid: Mutex::new(None),
        })
    }

    /// Stop verifying the router's TLS certificate for this session.
    ///
    /// The HTTP client is only rebuilt when verification is currently on.
    pub fn disable_https_verify(&mut self) -> Result<()> {
        if !self.config.verify_tls {
            return Ok(());
        }
        self.http = build_http_client(&self.config, false)?;
        self.config.verify_tls = false;
        Ok(())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session id of the current login, if any
    pub fn sid(&self) -> Option<String> {
        self.sid.lock().clone()
    }

    /// Log in and store the session id.
    pub async fn login(&self) -> Result<String> {
        tracing::info!(
            "Logging in to {} as {}",
            self.base_url,
            self.config.username
        );

        let request = ApiRequest::new(AUTH_ENDPOINT, API_AUTH, "Login", 2)
            .param("account", self.config.username.as_str())
            .param("passwd", self.config.password.as_str())
            .param("session", "webui")
            .param("format", "sid")
            .unrestricted();

        let data = match self.send(&request, None).await {
            Err(Error::Api { code, .. }) => return Err(Error::auth(code)),
            other => other?,
        };

        let sid = data
            .get("sid")
            .and_then(Value::as_str)
            .ok_or(Error::MissingField("sid"))?
            .to_string();

        *self.sid.lock() = Some(sid.clone());
        tracing::debug!("Login succeeded");
        Ok(sid)
    }

    async fn session_id(&self) -> Result<String> {
        let cached = self.sid.lock().clone();
        match cached {
            Some(sid) => Ok(sid),
            None => self.login().await,
        }
    }

    fn request_url(&self, request: &ApiRequest, sid: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.join(&request.endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                query.append_pair(&key, &value);
            }
            if let Some(sid) = sid {
                query.append_pair("_sid", sid);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: &ApiRequest, sid: Option<&str>) -> Result<Value> {
        let url = self.request_url(request, sid)?;

        tracing::debug!(
            "GET {}{} api={} method={} version={}",
            self.base_url,
            request.endpoint,
            request.api,
            request.method,
            request.version
        );

        let response = self.http.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                decode_envelope(&body)
            }
            status => Err(Error::HttpStatus(status)),
        }
    }
}

#[async_trait]
impl RouterApi for SrmClient {
    async fn call(&self, request: &ApiRequest) -> Result<Value> {
        if request.restricted {
            let sid = self.session_id().await?;
            self.send(request, Some(&sid)).await
        } else {
            self.send(request, None).await
        }
    }
}
