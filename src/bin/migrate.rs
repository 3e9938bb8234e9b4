use anyhow::Context;
use product_catalog_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to run migrations")?;
    let orm = create_orm_conn(database_url, 1).await?;
    run_migrations(&orm, &config.migrations_dir).await?;
    orm.close().await?;
    println!("Migrations applied");
    Ok(())
}
