use std::sync::Arc;
use async_trait::async_trait;
use flurry::HashSet;
use crate::domain::{AdminId, RegistryError};
use super::AdminRegistry;

/// Keeps the admins until the process exits.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAdmins {
    inner_set: Arc<HashSet<AdminId>>
}

#[async_trait]
impl AdminRegistry for InMemoryAdmins {
    async fn set(&self, id: AdminId) -> Result<(), RegistryError> {
        self.inner_set.insert(id, &self.inner_set.guard());
        Ok(())
    }

    async fn delete(&self, id: AdminId) -> Result<(), RegistryError> {
        self.inner_set.remove(&id, &self.inner_set.guard());
        Ok(())
    }

    async fn get(&self, id: AdminId) -> bool {
        self.inner_set.contains(&id, &self.inner_set.guard())
    }
}
