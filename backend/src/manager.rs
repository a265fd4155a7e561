use chrono::{Local, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::activity::{ActivityLog, LogLevel};
use crate::config::Config;
use crate::entities::firewall::{self, FirewallStatus};
use crate::error::{Error, Result};
use crate::services::provisioner::{
    DeploymentResult, DeviceConfigResult, FlowConfigResult, LifecycleAction, Provisioner,
    SimulatedProvisioner,
};
use crate::services::FirewallConfig;
use crate::store::FirewallStore;

pub const TECHNOLOGY_STACK: &str = "OSM+OpenFlow+NETCONF";
const DEPLOY_TECHNOLOGY_LABEL: &str = "OSM + OpenFlow + NETCONF/REST";
/// Reported as-is; no availability tracking exists.
const SYSTEM_UPTIME: &str = "99.8%";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DeployDetails {
    pub osm: DeploymentResult,
    pub openflow: FlowConfigResult,
    pub netconf: DeviceConfigResult,
    pub technology_stack: String,
}

/// Result of a mutating operation, serialized verbatim as the response body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DeployDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            firewall_id: None,
            message: Some(message.into()),
            details: None,
            error: None,
        }
    }

    fn failed(error: &Error) -> Self {
        Self {
            success: false,
            firewall_id: None,
            message: None,
            details: None,
            error: Some(error.to_string()),
        }
    }
}

/// Partial reconfiguration. Fields not listed here are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigureRequest {
    pub security_policy: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_firewalls: usize,
    pub running_firewalls: usize,
    pub stopped_firewalls: usize,
    pub system_uptime: String,
    pub total_logs: usize,
}

#[derive(Clone, Copy)]
enum Operation {
    Deploy,
    Start,
    Stop,
    Configure,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Deploy => "deploy",
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Configure => "configure",
            Operation::Delete => "delete",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Operation::Deploy => "deployed",
            Operation::Start => "started",
            Operation::Stop => "stopped",
            Operation::Configure => "configured",
            Operation::Delete => "deleted",
        }
    }
}

/// Facade over the store, the activity log and the provisioning backend.
///
/// Mutating operations hold `write_lock` from the existence check to the
/// final write, so concurrent requests against one id are serialized.
pub struct FirewallManager {
    store: FirewallStore,
    activity: ActivityLog,
    provisioner: Arc<dyn Provisioner>,
    write_lock: Mutex<()>,
}

impl FirewallManager {
    pub fn new(db: DatabaseConnection, provisioner: Arc<dyn Provisioner>) -> Self {
        let manager = Self {
            store: FirewallStore::new(db),
            activity: ActivityLog::new(),
            provisioner,
            write_lock: Mutex::new(()),
        };
        manager.activity.append(LogLevel::Info, "Firewall Manager initialized");
        manager
    }

    pub fn simulated(db: DatabaseConnection, config: &Config) -> Self {
        Self::new(db, Arc::new(SimulatedProvisioner::new(config)))
    }

    pub async fn deploy(&self, config: FirewallConfig) -> OperationOutcome {
        let _guard = self.write_lock.lock().await;

        match self.try_deploy(&config).await {
            Ok((firewall_id, details)) => OperationOutcome {
                firewall_id: Some(firewall_id),
                details: Some(details),
                ..OperationOutcome::ok("Firewall deployed successfully")
            },
            Err(e) => self.failure(Operation::Deploy, e),
        }
    }

    async fn try_deploy(&self, config: &FirewallConfig) -> Result<(String, DeployDetails)> {
        let firewall_id = self.next_id().await?;

        self.activity.append(
            LogLevel::Info,
            format!("Starting deployment of firewall: {}", config.name),
        );

        self.activity.append(LogLevel::Info, "Step 1: Deploying VNF via OSM");
        let osm = self.provisioner.deploy_instance(config).await?;

        self.activity.append(LogLevel::Info, "Step 2: Configuring OpenFlow rules");
        let openflow = self.provisioner.configure_flows(&firewall_id, config).await?;

        self.activity.append(LogLevel::Info, "Step 3: Configuring via NETCONF");
        let netconf = self.provisioner.configure_device(config).await?;

        self.store
            .insert(firewall::Model {
                id: firewall_id.clone(),
                name: config.name.clone(),
                management_ip: config.management_ip.clone(),
                subnet: config.subnet.clone(),
                vcpu: config.vcpu,
                ram: config.ram,
                security_policy: config.security_policy.clone(),
                status: FirewallStatus::Running,
                created_at: Local::now().naive_local(),
                technology_stack: TECHNOLOGY_STACK.to_string(),
                config_method: config.config_method.clone(),
            })
            .await?;

        self.activity.append(
            LogLevel::Success,
            format!("Firewall {} deployed successfully", config.name),
        );

        Ok((
            firewall_id,
            DeployDetails {
                osm,
                openflow,
                netconf,
                technology_stack: DEPLOY_TECHNOLOGY_LABEL.to_string(),
            },
        ))
    }

    /// `fw-<unix seconds>`, suffixed `-2`, `-3`, ... when that second is taken.
    async fn next_id(&self) -> Result<String> {
        let base = format!("fw-{}", Utc::now().timestamp());
        if !self.store.exists(&base).await? {
            return Ok(base);
        }

        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.store.exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    pub async fn start(&self, id: &str) -> OperationOutcome {
        self.change_status(id, Operation::Start).await
    }

    pub async fn stop(&self, id: &str) -> OperationOutcome {
        self.change_status(id, Operation::Stop).await
    }

    async fn change_status(&self, id: &str, op: Operation) -> OperationOutcome {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let firewall = self.find_existing(id).await?;
            let (status, action, progress) = match op {
                Operation::Stop => (FirewallStatus::Stopped, LifecycleAction::Stop, "Stopping"),
                _ => (FirewallStatus::Running, LifecycleAction::Start, "Starting"),
            };

            self.activity.append(
                LogLevel::Info,
                format!("{} firewall: {}", progress, firewall.name),
            );
            self.provisioner.lifecycle(&firewall, action).await?;
            self.store.update_status(id, status).await?;

            Ok::<_, Error>(firewall)
        }
        .await;

        self.finish(op, result)
    }

    pub async fn configure(&self, id: &str, request: ConfigureRequest) -> OperationOutcome {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let firewall = self.find_existing(id).await?;
            self.activity.append(
                LogLevel::Info,
                format!("Configuring firewall: {}", firewall.name),
            );

            if let Some(policy) = &request.security_policy {
                self.store.update_policy(id, policy).await?;
                self.activity.append(
                    LogLevel::Info,
                    format!("Updated security policy to: {}", policy),
                );
            }

            Ok::<_, Error>(firewall)
        }
        .await;

        self.finish(Operation::Configure, result)
    }

    pub async fn delete(&self, id: &str) -> OperationOutcome {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let firewall = self.find_existing(id).await?;
            self.activity.append(
                LogLevel::Info,
                format!("Deleting firewall: {}", firewall.name),
            );
            self.provisioner.lifecycle(&firewall, LifecycleAction::Delete).await?;
            self.store.delete(id).await?;

            Ok::<_, Error>(firewall)
        }
        .await;

        self.finish(Operation::Delete, result)
    }

    pub async fn get(&self, id: &str) -> Result<firewall::Model> {
        self.find_existing(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<firewall::Model>> {
        self.store.list_all().await
    }

    pub fn recent_logs(&self) -> Vec<String> {
        self.activity.recent()
    }

    pub async fn statistics(&self) -> Result<Statistics> {
        let firewalls = self.store.list_all().await?;
        let count = |status: FirewallStatus| firewalls.iter().filter(|fw| fw.status == status).count();

        Ok(Statistics {
            total_firewalls: firewalls.len(),
            running_firewalls: count(FirewallStatus::Running),
            stopped_firewalls: count(FirewallStatus::Stopped),
            system_uptime: SYSTEM_UPTIME.to_string(),
            total_logs: self.activity.len(),
        })
    }

    async fn find_existing(&self, id: &str) -> Result<firewall::Model> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn finish(&self, op: Operation, result: Result<firewall::Model>) -> OperationOutcome {
        match result {
            Ok(firewall) => {
                self.activity.append(
                    LogLevel::Success,
                    format!("Firewall {} {} successfully", firewall.name, op.past()),
                );
                OperationOutcome::ok(format!("Firewall {} successfully", op.past()))
            }
            Err(e) => self.failure(op, e),
        }
    }

    fn failure(&self, op: Operation, error: Error) -> OperationOutcome {
        let line = match &error {
            Error::NotFound(id) => format!("Failed to {} firewall {}: {}", op.verb(), id, error),
            _ => format!("Failed to {} firewall: {}", op.verb(), error),
        };
        self.activity.append(LogLevel::Error, line);
        OperationOutcome::failed(&error)
    }
}
