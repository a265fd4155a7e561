use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::path::Path;

use crate::config::Config;

pub async fn connect(config: &Config) -> Result<DatabaseConnection, sea_orm::DbErr> {
    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| sea_orm::DbErr::Custom(format!("cannot create {}: {}", parent.display(), e)))?;
        }
    }

    let db = Database::connect(config.database_url()).await?;
    tracing::info!("Connected to the database at {}", config.database_path);

    create_schema(&db).await?;

    Ok(db)
}

async fn create_schema(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    use sea_orm::Schema;
    use crate::entities::firewall;

    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmt = schema.create_table_from_entity(firewall::Entity).if_not_exists().to_owned();
    db.execute(builder.build(&stmt)).await?;

    tracing::info!("Schema initialized (firewalls table)");
    Ok(())
}
