//! Fixed call sequence run against one router session.
//!
//! Steps run strictly in order. The first failure ends the run and is
//! returned; later steps are never attempted.

use anyhow::{Context, Result};
use rt2600ac_client::RouterApi;
use serde_json::{Map, Value};
use std::fmt;
use std::io::Write;

use crate::render::{discovery_line, write_json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `SYNO.API.Info` listing, printed one line per API
    Discovery,
    Certificates,
    /// Network devices whose hostname matches
    HostLookup { hostname: String },
    /// Any API family and method through the routed helper
    Call { api: String, method: String },
}

impl Step {
    pub fn call(api: &str, method: &str) -> Self {
        Self::Call {
            api: api.to_string(),
            method: method.to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery => write!(f, "API discovery"),
            Self::Certificates => write!(f, "certificate listing"),
            Self::HostLookup { hostname } => write!(f, "host lookup for {hostname}"),
            Self::Call { api, method } => write!(f, "{api}.{method}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPlan {
    steps: Vec<Step>,
}

impl CallPlan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Discovery, certificates, host lookup, external IP, utilization,
    /// topology and Wi-Fi clients.
    pub fn standard(lookup_hostname: &str) -> Self {
        Self::new(vec![
            Step::Discovery,
            Step::Certificates,
            Step::HostLookup {
                hostname: lookup_hostname.to_string(),
            },
            Step::call("SYNO.Core.DDNS.ExtIP", "list"),
            Step::call("SYNO.Core.System.Utilization", "get"),
            Step::call("SYNO.Core.Network.Router.Topology", "get"),
            Step::call("SYNO.Core.Network.Wifi.Client", "list"),
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Run every step of `plan`, writing each result to `out`.
pub async fn execute_plan<A, W>(api: &A, plan: &CallPlan, out: &mut W) -> Result<()>
where
    A: RouterApi + ?Sized,
    W: Write,
{
    for step in plan.steps() {
        tracing::info!("Calling {step}");
        execute_step(api, step, out)
            .await
            .with_context(|| format!("{step} failed"))?;
    }
    Ok(())
}

async fn execute_step<A, W>(api: &A, step: &Step, out: &mut W) -> Result<()>
where
    A: RouterApi + ?Sized,
    W: Write,
{
    match step {
        Step::Discovery => {
            let info = api.query_info().await?;
            tracing::debug!("Router exposes {} APIs", info.len());
            for (name, entry) in &info {
                writeln!(out, "{}", discovery_line(name, entry))?;
            }
        }
        Step::Certificates => write_json(out, &api.list_certificate().await?)?,
        Step::HostLookup { hostname } => {
            let mut filter = Map::new();
            filter.insert("hostname".to_string(), Value::String(hostname.clone()));
            let devices = api.get_network_nsm_device(&filter).await?;
            write_json(out, &Value::Array(devices))?;
        }
        Step::Call { api: name, method } => write_json(out, &api.api_call(name, method).await?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rt2600ac_client::{ApiRequest, Error};
    use serde_json::json;

    /// Answers discovery with a single API and everything else with a small
    /// object, recording every request.
    #[derive(Default)]
    struct FixedRouter {
        calls: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl RouterApi for FixedRouter {
        async fn call(&self, request: &ApiRequest) -> rt2600ac_client::Result<Value> {
            self.calls.lock().push(request.clone());
            Ok(match request.api.as_str() {
                "SYNO.API.Info" => json!({"SYNO.API.Info": {"minVersion": 1, "maxVersion": 3}}),
                "SYNO.Core.Network.NSM.Device" => json!({"devices": [
                    {"hostname": "DESKTOP-6AVJ2SV", "mac": "01"},
                    {"hostname": "tv", "mac": "02"}
                ]}),
                _ => json!({"api": request.api, "ok": true}),
            })
        }
    }

    /// Fails every call
    #[derive(Default)]
    struct BrokenRouter {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl RouterApi for BrokenRouter {
        async fn call(&self, _request: &ApiRequest) -> rt2600ac_client::Result<Value> {
            *self.calls.lock() += 1;
            Err(Error::api(106))
        }
    }

    #[tokio::test]
    async fn test_discovery_output() {
        let router = FixedRouter::default();
        let mut out = Vec::new();
        execute_plan(&router, &CallPlan::new(vec![Step::Discovery]), &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "API endpoint SYNO.API.Info (minVersion=1, maxVersion=3)\n"
        );
    }

    #[tokio::test]
    async fn test_discovery_keeps_router_order() {
        struct UnsortedDiscovery;

        #[async_trait]
        impl RouterApi for UnsortedDiscovery {
            async fn call(&self, _request: &ApiRequest) -> rt2600ac_client::Result<Value> {
                Ok(json!({
                    "SYNO.Core.Zeta": {"minVersion": 1, "maxVersion": 2},
                    "SYNO.API.Auth": {"minVersion": 1, "maxVersion": 6}
                }))
            }
        }

        let mut out = Vec::new();
        execute_plan(
            &UnsortedDiscovery,
            &CallPlan::new(vec![Step::Discovery]),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "API endpoint SYNO.Core.Zeta (minVersion=1, maxVersion=2)\n\
             API endpoint SYNO.API.Auth (minVersion=1, maxVersion=6)\n"
        );
    }

    #[tokio::test]
    async fn test_standard_plan_runs_in_order() {
        let router = FixedRouter::default();
        let mut out = Vec::new();
        execute_plan(&router, &CallPlan::standard("DESKTOP-6AVJ2SV"), &mut out)
            .await
            .unwrap();

        let apis: Vec<_> = router.calls.lock().iter().map(|r| r.api.clone()).collect();
        assert_eq!(
            apis,
            vec![
                "SYNO.API.Info",
                "SYNO.Core.Certificate.CRT",
                "SYNO.Core.Network.NSM.Device",
                "SYNO.Core.DDNS.ExtIP",
                "SYNO.Core.System.Utilization",
                "SYNO.Core.Network.Router.Topology",
                "SYNO.Core.Network.Wifi.Client",
            ]
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("API endpoint SYNO.API.Info (minVersion=1, maxVersion=3)\n"));
        assert!(text.contains("\"mac\": \"01\""));
        assert!(!text.contains("\"mac\": \"02\""));
        assert!(text.contains(
            "{\n    \"api\": \"SYNO.Core.Network.Wifi.Client\",\n    \"ok\": true\n}\n"
        ));
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let router = BrokenRouter::default();
        let mut out = Vec::new();
        let err = execute_plan(&router, &CallPlan::standard("host"), &mut out)
            .await
            .unwrap_err();

        assert_eq!(*router.calls.lock(), 1);
        assert!(out.is_empty());
        assert_eq!(err.to_string(), "API discovery failed");
        assert!(err.root_cause().to_string().contains("Session timeout"));
    }

    #[tokio::test]
    async fn test_failure_midway_keeps_earlier_output() {
        struct FailsOnTopology(FixedRouter);

        #[async_trait]
        impl RouterApi for FailsOnTopology {
            async fn call(&self, request: &ApiRequest) -> rt2600ac_client::Result<Value> {
                if request.api == "SYNO.Core.Network.Router.Topology" {
                    return Err(Error::api(103));
                }
                self.0.call(request).await
            }
        }

        let router = FailsOnTopology(FixedRouter::default());
        let mut out = Vec::new();
        let err = execute_plan(&router, &CallPlan::standard("host"), &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "SYNO.Core.Network.Router.Topology.get failed");
        assert_eq!(router.0.calls.lock().len(), 5);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("SYNO.Core.System.Utilization"));
        assert!(!text.contains("SYNO.Core.Network.Wifi.Client"));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Discovery.to_string(), "API discovery");
        assert_eq!(
            Step::call("SYNO.Core.DDNS.ExtIP", "list").to_string(),
            "SYNO.Core.DDNS.ExtIP.list"
        );
    }
}
