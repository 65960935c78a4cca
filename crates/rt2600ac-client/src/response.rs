//! Response envelope and typed discovery records

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
}

/// Unwrap a `{"success": .., "data": ..}` envelope.
///
/// A missing `data` member decodes to `Value::Null`. A failure envelope
/// without an error code is reported as code 100.
pub fn decode_envelope(body: &[u8]) -> Result<Value> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    if envelope.success {
        Ok(envelope.data.unwrap_or(Value::Null))
    } else {
        let code = envelope.error.map_or(100, |e| e.code);
        Err(Error::api(code))
    }
}

/// One entry of the `SYNO.API.Info` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfoEntry {
    #[serde(default)]
    pub path: String,
    pub min_version: u32,
    pub max_version: u32,
    #[serde(default)]
    pub request_format: Option<String>,
}

/// API name to supported version range, in the order the router lists them
pub type ApiInfo = IndexMap<String, ApiInfoEntry>;

/// Decode a discovery listing from a raw response value
pub fn parse_api_info(value: Value) -> Result<ApiInfo> {
    Ok(serde_json::from_value(value)?)
}
