//! Seed the first admin account
//!
//! Reads `SUPERADMIN_EMAIL`, `SUPERADMIN_USERNAME` and `SUPERADMIN_PASSWORD`
//! and creates an admin in the MySQL staff store unless one already exists.

use std::sync::Arc;

use anyhow::Context;
use log::info;

use pa_core::services::{AccountStore, PasswordHasher, StaffService};
use pa_infra::database::{DatabasePool, MySqlAccountRepository};
use pa_shared::config::AppConfig;
use pa_shared::validation::mask_email;

fn required_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("{} must be set", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let email = required_var("SUPERADMIN_EMAIL")?;
    let display_name = required_var("SUPERADMIN_USERNAME")?;
    let password = required_var("SUPERADMIN_PASSWORD")?;

    let config = AppConfig::from_env();
    let database_config = config
        .database
        .clone()
        .context("DATABASE_URL must be set to seed an admin")?;

    let run_migrations = database_config.run_migrations;
    let pool = DatabasePool::new(database_config)
        .await
        .context("Failed to connect to MySQL")?;
    if run_migrations {
        pool.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let repository = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let store = Arc::new(AccountStore::new(
        repository,
        PasswordHasher::new(&config.auth.password),
    ));
    let staff = StaffService::new(store);

    let outcome = staff
        .bootstrap_admin(display_name, email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin: {}", e));

    pool.close().await;

    match outcome? {
        Some(admin) => info!("Admin created: {} ({})", admin.id, mask_email(&admin.email)),
        None => info!("An admin already exists; nothing to do"),
    }
    Ok(())
}
