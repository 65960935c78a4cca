//! # rt2600ac-client
//!
//! Client for the web API served by Synology SRM routers (RT2600ac, MR2200ac,
//! RT6600ax) under `/webapi/`.
//!
//! Every call is a `GET` on one of three CGI endpoints carrying the API
//! family, method and version as query parameters:
//!
//! ```text
//! auth.cgi   SYNO.API.Auth   Login          -> session id (_sid)
//! query.cgi  SYNO.API.Info   query          -> discovery listing
//! entry.cgi  SYNO.Core.*     list/get/...   -> everything else
//! ```
//!
//! Responses are wrapped in `{"success": bool, "data": ..., "error": {"code": n}}`;
//! [`RouterApi::call`] returns the unwrapped `data` or an [`Error`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use rt2600ac_client::{ClientConfig, RouterApi, SrmClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig {
//!         password: std::env::var("RT2600AC_PASSWORD")?,
//!         ..Default::default()
//!     };
//!     let mut client = SrmClient::new(config)?;
//!     client.disable_https_verify()?;
//!
//!     for (name, entry) in client.query_info().await? {
//!         println!("{name}: {}..={}", entry.min_version, entry.max_version);
//!     }
//!
//!     let utilization = client.api_call("SYNO.Core.System.Utilization", "get").await?;
//!     println!("{utilization:#}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use api::RouterApi;
pub use client::SrmClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use request::{ApiRequest, AUTH_ENDPOINT, ENTRY_ENDPOINT, QUERY_ENDPOINT};
pub use response::{ApiInfo, ApiInfoEntry};
