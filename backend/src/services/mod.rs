pub mod flow_rules;
pub mod provisioner;

use serde::{Deserialize, Serialize};

/// Desired shape of a firewall instance, as submitted for deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallConfig {
    pub name: String,
    #[serde(default)]
    pub management_ip: String,
    #[serde(default)]
    pub subnet: String,
    #[serde(default = "default_vcpu")]
    pub vcpu: i32,
    #[serde(default = "default_ram")]
    pub ram: i32,
    #[serde(default = "default_policy")]
    pub security_policy: String,
    #[serde(default = "default_config_method")]
    pub config_method: String,
}

impl FirewallConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            management_ip: String::new(),
            subnet: String::new(),
            vcpu: default_vcpu(),
            ram: default_ram(),
            security_policy: default_policy(),
            config_method: default_config_method(),
        }
    }
}

fn default_vcpu() -> i32 {
    1
}

fn default_ram() -> i32 {
    2
}

fn default_policy() -> String {
    "default".to_string()
}

fn default_config_method() -> String {
    "netconf".to_string()
}
