use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entities::firewall::{self, FirewallStatus};
use crate::error::Result;

/// Persistence for firewall records. Sole owner of record state.
#[derive(Clone)]
pub struct FirewallStore {
    db: DatabaseConnection,
}

impl FirewallStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fails with a storage error when the id is already taken.
    pub async fn insert(&self, record: firewall::Model) -> Result<()> {
        let active = firewall::ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            management_ip: Set(record.management_ip),
            subnet: Set(record.subnet),
            vcpu: Set(record.vcpu),
            ram: Set(record.ram),
            security_policy: Set(record.security_policy),
            status: Set(record.status),
            created_at: Set(record.created_at),
            technology_stack: Set(record.technology_stack),
            config_method: Set(record.config_method),
        };
        firewall::Entity::insert(active)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<firewall::Model>> {
        Ok(firewall::Entity::find_by_id(id.to_string()).one(&self.db).await?)
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count = firewall::Entity::find()
            .filter(firewall::Column::Id.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Newest first.
    pub async fn list_all(&self) -> Result<Vec<firewall::Model>> {
        Ok(firewall::Entity::find()
            .order_by_desc(firewall::Column::CreatedAt)
            .order_by_desc(firewall::Column::Id)
            .all(&self.db)
            .await?)
    }

    // Updates and deletes on an absent id touch zero rows and succeed.

    pub async fn update_status(&self, id: &str, status: FirewallStatus) -> Result<()> {
        firewall::Entity::update_many()
            .col_expr(firewall::Column::Status, Expr::value(status.as_str()))
            .filter(firewall::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn update_policy(&self, id: &str, policy: &str) -> Result<()> {
        firewall::Entity::update_many()
            .col_expr(firewall::Column::SecurityPolicy, Expr::value(policy))
            .filter(firewall::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        firewall::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
