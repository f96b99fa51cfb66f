mod admins;
mod memory;

#[cfg(test)]
pub(crate) mod test;

use std::sync::Arc;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
pub use admins::*;
pub use memory::*;
use crate::config::{DatabaseConfig, RegistryBackend, RegistryConfig};
use crate::domain::{AdminId, RegistryError};

/// Who has turned on the admin mode.
///
/// Writes report failures to the caller; reads never do and answer `false` instead.
#[async_trait]
pub trait AdminRegistry: Send + Sync {
    async fn set(&self, id: AdminId) -> Result<(), RegistryError>;
    async fn delete(&self, id: AdminId) -> Result<(), RegistryError>;
    async fn get(&self, id: AdminId) -> bool;
}

/// Used when no store is configured or the configured one couldn't be reached at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledRegistry;

#[async_trait]
impl AdminRegistry for DisabledRegistry {
    async fn set(&self, id: AdminId) -> Result<(), RegistryError> {
        log::warn!("couldn't grant the admin mode to {id}: no registry");
        Err(RegistryError::Unconfigured)
    }

    async fn delete(&self, id: AdminId) -> Result<(), RegistryError> {
        log::warn!("couldn't revoke the admin mode from {id}: no registry");
        Err(RegistryError::Unconfigured)
    }

    async fn get(&self, _: AdminId) -> bool {
        false
    }
}

pub async fn registry_from_config(config: &RegistryConfig) -> Arc<dyn AdminRegistry> {
    match (config.backend, &config.database) {
        (RegistryBackend::Postgres, Some(db_config)) => match establish_database_connection(db_config).await {
            Ok(pool) => {
                log::info!("AdminRegistry: postgres");
                Arc::new(Admins::new(pool))
            }
            Err(e) => {
                log::error!("couldn't connect to the database, the admin mode is unavailable: {e:#}");
                Arc::new(DisabledRegistry)
            }
        },
        (RegistryBackend::Postgres, None) => {
            log::error!("REGISTRY_BACKEND is postgres but DATABASE_URL is not set, the admin mode is unavailable");
            Arc::new(DisabledRegistry)
        }
        (RegistryBackend::Memory, _) => {
            log::info!("AdminRegistry: in-memory");
            Arc::new(InMemoryAdmins::default())
        }
        (RegistryBackend::Disabled, _) => {
            log::info!("AdminRegistry: none");
            Arc::new(DisabledRegistry)
        }
    }
}

pub async fn establish_database_connection(config: &DatabaseConfig) -> Result<Pool<Postgres>, anyhow::Error> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.url.as_str()).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}
