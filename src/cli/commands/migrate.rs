use anyhow::Context;

use crate::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let db = DatabaseManager::connect_lazy(&config::config().database).context("failed to configure database")?;
    db.migrate().await.context("failed to apply migrations")?;
    db.close().await;
    println!("Migrations applied");
    Ok(())
}
