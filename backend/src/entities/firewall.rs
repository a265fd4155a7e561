use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "firewalls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,             // fw-<unix seconds>[-n]
    pub name: String,
    pub management_ip: String,
    pub subnet: String,         // CIDR the flow rules are scoped to
    pub vcpu: i32,
    pub ram: i32,               // GB
    pub security_policy: String,
    pub status: FirewallStatus,
    pub created_at: DateTime,   // local time, never updated
    pub technology_stack: String,
    pub config_method: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum FirewallStatus {
    #[sea_orm(string_value = "running")]
    Running,
    #[sea_orm(string_value = "stopped")]
    Stopped,
}

impl FirewallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallStatus::Running => "running",
            FirewallStatus::Stopped => "stopped",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
