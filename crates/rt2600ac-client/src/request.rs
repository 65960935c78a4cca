//! Endpoint descriptors for web API calls

use serde_json::Value;
use std::collections::BTreeMap;

/// Discovery endpoint (`SYNO.API.Info`)
pub const QUERY_ENDPOINT: &str = "query.cgi";

/// General entry endpoint used by every other API family
pub const ENTRY_ENDPOINT: &str = "entry.cgi";

/// Authentication endpoint (`SYNO.API.Auth`)
pub const AUTH_ENDPOINT: &str = "auth.cgi";

/// Method name that selects the discovery endpoint
pub const QUERY_METHOD: &str = "query";

/// One remote operation: endpoint path, API family, method and version.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub api: String,
    pub method: String,
    pub version: u32,
    pub params: BTreeMap<String, Value>,
    /// Whether the call needs a logged-in session (`_sid`)
    pub restricted: bool,
}

impl ApiRequest {
    /// Restricted request against an explicit endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        api: impl Into<String>,
        method: impl Into<String>,
        version: u32,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api: api.into(),
            method: method.into(),
            version,
            params: BTreeMap::new(),
            restricted: true,
        }
    }

    /// Version 1 request whose endpoint follows the method name.
    ///
    /// `query` goes to the discovery endpoint, anything else to the entry
    /// endpoint.
    pub fn routed(api: impl Into<String>, method: impl Into<String>) -> Self {
        let method = method.into();
        let endpoint = if method == QUERY_METHOD {
            QUERY_ENDPOINT
        } else {
            ENTRY_ENDPOINT
        };
        Self::new(endpoint, api, method, 1)
    }

    /// Add an extra parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Mark the request as callable without a session
    #[must_use]
    pub fn unrestricted(mut self) -> Self {
        self.restricted = false;
        self
    }

    /// Query string pairs, excluding `_sid`.
    ///
    /// Strings are sent verbatim, other values as compact JSON.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("api".to_string(), self.api.clone()),
            ("version".to_string(), self.version.to_string()),
            ("method".to_string(), self.method.clone()),
        ];
        pairs.extend(self.params.iter().map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        }));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_query_method_routes_to_discovery() {
        let request = ApiRequest::routed("X", "query");
        assert_eq!(request.endpoint, QUERY_ENDPOINT);
        assert_eq!(request.version, 1);
        assert!(request.restricted);
    }

    #[test]
    fn test_other_methods_route_to_entry() {
        for method in ["list", "get", "Query", "query_all", ""] {
            let request = ApiRequest::routed("X", method);
            assert_eq!(request.endpoint, ENTRY_ENDPOINT, "method {method:?}");
            assert_eq!(request.api, "X");
            assert_eq!(request.method, method);
        }
    }

    #[test]
    fn test_query_pairs_encoding() {
        let request = ApiRequest::routed("SYNO.Core.Network.NSM.Device", "get")
            .param("conntype", "all")
            .param("limit", 5)
            .param("flags", json!(["a", "b"]))
            .param("enabled", true);

        assert_eq!(
            request.query_pairs(),
            vec![
                ("api".to_string(), "SYNO.Core.Network.NSM.Device".to_string()),
                ("version".to_string(), "1".to_string()),
                ("method".to_string(), "get".to_string()),
                ("conntype".to_string(), "all".to_string()),
                ("enabled".to_string(), "true".to_string()),
                ("flags".to_string(), r#"["a","b"]"#.to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_unrestricted() {
        let request = ApiRequest::new(AUTH_ENDPOINT, "SYNO.API.Auth", "Login", 2).unrestricted();
        assert!(!request.restricted);
    }
}
