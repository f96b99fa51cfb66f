use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use crate::domain::{AdminId, RegistryError};
use super::AdminRegistry;

#[derive(Clone)]
pub struct Admins {
    pool: Pool<Postgres>,
}

impl Admins {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRegistry for Admins {
    async fn set(&self, id: AdminId) -> Result<(), RegistryError> {
        sqlx::query("INSERT INTO Admins (id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RegistryError::StoreUnavailable)?;
        Ok(())
    }

    async fn delete(&self, id: AdminId) -> Result<(), RegistryError> {
        sqlx::query("DELETE FROM Admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RegistryError::StoreUnavailable)?;
        Ok(())
    }

    async fn get(&self, id: AdminId) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM Admins WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .inspect_err(|e| log::error!("couldn't check whether {id} is an admin: {e}"))
            .unwrap_or(false)
    }
}
