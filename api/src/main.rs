use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};

use pa_api::server::{self, Stores};
use pa_infra::cache::{RedisClient, RedisRevocationRepository};
use pa_infra::database::{
    DatabasePool, MySqlAccountRepository, MySqlPaymentRepository, MySqlRevocationRepository,
};
use pa_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting PayApprove API Server ({:?})", config.environment);

    config
        .validate()
        .map_err(|message| anyhow::anyhow!("Invalid configuration: {}", message))?;

    let redis = match &config.cache {
        Some(cache_config) => {
            let client = RedisClient::new(cache_config.clone())
                .await
                .context("Failed to connect to Redis")?;
            if !client.health_check().await.context("Redis health check failed")? {
                anyhow::bail!("Redis answered PING with an unexpected reply");
            }
            info!("Revocation ledger: Redis");
            Some(Arc::new(RedisRevocationRepository::new(client)))
        }
        None => None,
    };

    match config.database.clone() {
        Some(database_config) => {
            let run_migrations = database_config.run_migrations;
            let pool = DatabasePool::new(database_config)
                .await
                .context("Failed to connect to MySQL")?;
            if !pool.health_check().await.context("MySQL health check failed")? {
                anyhow::bail!("MySQL answered the health query with an unexpected value");
            }

            if run_migrations {
                pool.run_migrations()
                    .await
                    .context("Failed to run database migrations")?;
                info!("Database migrations applied");
            }
            info!("{}", pool.get_statistics());

            let accounts = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
            let payments = Arc::new(MySqlPaymentRepository::new(pool.get_pool().clone()));

            match redis {
                Some(revocations) => {
                    server::run(config, Stores { accounts, revocations, payments }).await
                }
                None => {
                    let revocations =
                        Arc::new(MySqlRevocationRepository::new(pool.get_pool().clone()));
                    server::run(config, Stores { accounts, revocations, payments }).await
                }
            }
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory stores, data is lost on restart");
            let memory = Stores::in_memory();

            match redis {
                Some(revocations) => {
                    let stores = Stores {
                        accounts: memory.accounts,
                        revocations,
                        payments: memory.payments,
                    };
                    server::run(config, stores).await
                }
                None => server::run(config, memory).await,
            }
        }
    }
}
