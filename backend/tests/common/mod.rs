#![allow(dead_code)]

use std::sync::Arc;

use nfv_firewall::config::{Config, SimulatedLatency};
use nfv_firewall::db;
use nfv_firewall::manager::FirewallManager;
use nfv_firewall::services::provisioner::Provisioner;
use nfv_firewall::services::FirewallConfig;
use tempfile::TempDir;

/// Manager over a throwaway database; keep the `TempDir` alive for the test.
pub struct Harness {
    pub manager: Arc<FirewallManager>,
    pub config: Config,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        database_path: dir.path().join("database").join("firewalls.db").display().to_string(),
        latency: SimulatedLatency::none(),
        ..Config::default()
    }
}

pub async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let conn = db::connect(&config).await.unwrap();
    Harness {
        manager: Arc::new(FirewallManager::simulated(conn, &config)),
        config,
        _dir: dir,
    }
}

pub async fn harness_with(provisioner: Arc<dyn Provisioner>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let conn = db::connect(&config).await.unwrap();
    Harness {
        manager: Arc::new(FirewallManager::new(conn, provisioner)),
        config,
        _dir: dir,
    }
}

pub fn web_firewall() -> FirewallConfig {
    FirewallConfig {
        management_ip: "10.0.0.1".into(),
        subnet: "10.0.1.0/24".into(),
        vcpu: 2,
        ram: 4,
        security_policy: "web".into(),
        ..FirewallConfig::named("web-fw")
    }
}
