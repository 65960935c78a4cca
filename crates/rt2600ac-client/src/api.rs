//! Router API surface
//!
//! [`RouterApi`] has one required method, the low-level [`RouterApi::call`]
//! primitive. Everything else is layered on top of it, so a test double only
//! has to answer raw requests.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::request::{ApiRequest, ENTRY_ENDPOINT, QUERY_ENDPOINT};
use crate::response::{ApiInfo, parse_api_info};

pub const API_INFO: &str = "SYNO.API.Info";
pub const CERTIFICATE_CRT: &str = "SYNO.Core.Certificate.CRT";
pub const NSM_DEVICE: &str = "SYNO.Core.Network.NSM.Device";

#[async_trait]
pub trait RouterApi: Send + Sync {
    /// Dispatch one request and return the decoded `data` member.
    async fn call(&self, request: &ApiRequest) -> Result<Value>;

    /// Call `api`/`method` at version 1 on the endpoint chosen by
    /// [`ApiRequest::routed`].
    async fn api_call(&self, api: &str, method: &str) -> Result<Value> {
        self.call(&ApiRequest::routed(api, method)).await
    }

    /// List every API the router exposes with its version range.
    async fn query_info(&self) -> Result<ApiInfo> {
        let request = ApiRequest::new(QUERY_ENDPOINT, API_INFO, "query", 1)
            .param("query", "all")
            .unrestricted();
        parse_api_info(self.call(&request).await?)
    }

    async fn list_certificate(&self) -> Result<Value> {
        self.call(&ApiRequest::new(ENTRY_ENDPOINT, CERTIFICATE_CRT, "list", 1))
            .await
    }

    /// Devices known to the network manager whose fields equal every pair
    /// in `filter`. An empty filter returns all devices.
    async fn get_network_nsm_device(&self, filter: &Map<String, Value>) -> Result<Vec<Value>> {
        let request =
            ApiRequest::new(ENTRY_ENDPOINT, NSM_DEVICE, "get", 1).param("conntype", "all");
        let mut response = self.call(&request).await?;

        let devices = match response.get_mut("devices").map(Value::take) {
            Some(Value::Array(devices)) => devices,
            _ => return Err(Error::MissingField("devices")),
        };

        Ok(devices
            .into_iter()
            .filter(|device| matches_filter(device, filter))
            .collect())
    }
}

fn matches_filter(device: &Value, filter: &Map<String, Value>) -> bool {
    filter
        .iter()
        .all(|(key, expected)| device.get(key) == Some(expected))
}
