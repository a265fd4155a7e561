use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::config::{Config, NetconfConfig, OsmConfig, SimulatedLatency};
use crate::entities::firewall;
use crate::error::Result;
use crate::services::flow_rules::{self, FlowRule};
use crate::services::FirewallConfig;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DeploymentResult {
    pub status: String,
    pub vnf_id: String,
    pub ns_id: String,
    pub message: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FlowConfigResult {
    pub status: String,
    pub rules_installed: usize,
    pub controller: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DeviceConfigResult {
    pub status: String,
    pub method: String,
    pub session_established: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Stop,
    Delete,
}

/// Backend that turns a firewall record into running infrastructure:
/// VNF instantiation, flow-rule installation, device configuration.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn deploy_instance(&self, config: &FirewallConfig) -> Result<DeploymentResult>;

    async fn configure_flows(&self, firewall_id: &str, config: &FirewallConfig) -> Result<FlowConfigResult>;

    async fn configure_device(&self, config: &FirewallConfig) -> Result<DeviceConfigResult>;

    async fn lifecycle(&self, firewall: &firewall::Model, action: LifecycleAction) -> Result<()>;
}

// Request payloads a real backend would send. Built and traced, never transmitted.

#[derive(Serialize, Debug)]
struct VnfDescriptor<'a> {
    vnfd_id: &'static str,
    vnf_name: &'a str,
    vim_account: &'static str,
    config: VnfResources,
}

#[derive(Serialize, Debug)]
struct VnfResources {
    vcpu: i32,
    ram: i32,
    interfaces: u8,
}

#[derive(Serialize, Debug)]
struct OpenFlowPush<'a> {
    firewall_id: &'a str,
    subnet: &'a str,
    policy: &'a str,
    flow_rules: Vec<FlowRule>,
}

#[derive(Serialize, Debug)]
struct NetconfEdit<'a> {
    target: &'a str,
    port: u16,
    username: &'a str,
    config: NetconfPolicy<'a>,
}

#[derive(Serialize, Debug)]
struct NetconfPolicy<'a> {
    security_policy: &'a str,
    interfaces: [InterfaceZone; 2],
}

#[derive(Serialize, Debug)]
struct InterfaceZone {
    name: &'static str,
    zone: &'static str,
}

/// Stands in for OSM, the OpenFlow controller and NETCONF sessions.
/// Every call succeeds after the configured latency.
pub struct SimulatedProvisioner {
    osm: OsmConfig,
    openflow_controller: String,
    netconf: NetconfConfig,
    latency: SimulatedLatency,
}

impl SimulatedProvisioner {
    pub fn new(config: &Config) -> Self {
        Self {
            osm: config.osm.clone(),
            openflow_controller: config.openflow_controller.clone(),
            netconf: config.netconf.clone(),
            latency: config.latency,
        }
    }

    fn trace_payload<T: Serialize>(target: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(body) => tracing::debug!("-> {}: {}", target, body),
            Err(e) => tracing::debug!("-> {}: <unserializable payload: {}>", target, e),
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl Provisioner for SimulatedProvisioner {
    async fn deploy_instance(&self, config: &FirewallConfig) -> Result<DeploymentResult> {
        let descriptor = VnfDescriptor {
            vnfd_id: "firewall-vnfd",
            vnf_name: &config.name,
            vim_account: "sme-vim",
            config: VnfResources {
                vcpu: config.vcpu,
                ram: config.ram,
                interfaces: 2,
            },
        };
        Self::trace_payload(&format!("osm {}:{}", self.osm.host, self.osm.port), &descriptor);

        simulate(self.latency.deployment).await;

        Ok(DeploymentResult {
            status: "deployed".into(),
            vnf_id: format!("vnf-{}", config.name),
            ns_id: format!("ns-{}", config.name),
            message: "VNF instantiated successfully via OSM".into(),
        })
    }

    async fn configure_flows(&self, firewall_id: &str, config: &FirewallConfig) -> Result<FlowConfigResult> {
        let push = OpenFlowPush {
            firewall_id,
            subnet: &config.subnet,
            policy: &config.security_policy,
            flow_rules: flow_rules::generate_flow_rules(&config.subnet, &config.security_policy),
        };
        Self::trace_payload(&self.openflow_controller, &push);

        simulate(self.latency.flow_configuration).await;

        Ok(FlowConfigResult {
            status: "configured".into(),
            rules_installed: push.flow_rules.len(),
            controller: self.openflow_controller.clone(),
        })
    }

    async fn configure_device(&self, config: &FirewallConfig) -> Result<DeviceConfigResult> {
        let edit = NetconfEdit {
            target: &config.management_ip,
            port: self.netconf.port,
            username: &self.netconf.username,
            config: NetconfPolicy {
                security_policy: &config.security_policy,
                interfaces: [
                    InterfaceZone { name: "eth0", zone: "untrusted" },
                    InterfaceZone { name: "eth1", zone: "trusted" },
                ],
            },
        };
        Self::trace_payload("netconf", &edit);

        simulate(self.latency.device_configuration).await;

        Ok(DeviceConfigResult {
            status: "configured".into(),
            method: "NETCONF".into(),
            session_established: true,
        })
    }

    async fn lifecycle(&self, firewall: &firewall::Model, action: LifecycleAction) -> Result<()> {
        tracing::debug!("osm {:?} for {} ({})", action, firewall.id, firewall.name);
        simulate(self.latency.lifecycle).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provisioner() -> SimulatedProvisioner {
        let config = Config {
            latency: SimulatedLatency::none(),
            ..Config::default()
        };
        SimulatedProvisioner::new(&config)
    }

    fn web_config() -> FirewallConfig {
        FirewallConfig {
            management_ip: "10.0.0.1".into(),
            subnet: "10.0.1.0/24".into(),
            security_policy: "web".into(),
            ..FirewallConfig::named("web-fw")
        }
    }

    #[tokio::test]
    async fn deployment_ids_derive_from_name() {
        let result = provisioner().deploy_instance(&web_config()).await.unwrap();
        assert_eq!(result.status, "deployed");
        assert_eq!(result.vnf_id, "vnf-web-fw");
        assert_eq!(result.ns_id, "ns-web-fw");
    }

    #[tokio::test]
    async fn flow_configuration_counts_policy_rules() {
        let p = provisioner();
        let result = p.configure_flows("fw-1", &web_config()).await.unwrap();
        assert_eq!(result.rules_installed, 3);
        assert_eq!(result.controller, "http://localhost:8080");

        let unknown = FirewallConfig {
            security_policy: "custom".into(),
            ..web_config()
        };
        assert_eq!(p.configure_flows("fw-1", &unknown).await.unwrap().rules_installed, 0);
    }

    #[tokio::test]
    async fn device_configuration_reports_netconf_session() {
        let result = provisioner().configure_device(&web_config()).await.unwrap();
        assert_eq!(result.method, "NETCONF");
        assert!(result.session_established);
    }

    #[tokio::test(start_paused = true)]
    async fn deployment_waits_for_configured_latency() {
        let p = SimulatedProvisioner::new(&Config::default());
        let started = tokio::time::Instant::now();
        p.deploy_instance(&web_config()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
