use testcontainers::clients;
use crate::config::{RegistryBackend, RegistryConfig};
use crate::domain::{AdminId, RegistryError};
use crate::repo;
use crate::repo::AdminRegistry;
use crate::repo::test::{CHAT_ID, start_postgres};

#[tokio::test]
#[ignore]
async fn set_get_delete() {
    let docker = clients::Cli::default();
    let (_container, db) = start_postgres(&docker).await;
    let admins = repo::Admins::new(db.clone());
    let id = AdminId::from(CHAT_ID);

    assert!(!admins.get(id).await);

    admins.set(id).await.expect("couldn't grant the admin mode");
    assert!(admins.get(id).await);
    admins.set(id).await.expect("couldn't grant the admin mode twice");
    assert!(admins.get(id).await);

    let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM Admins")
        .fetch_one(&db)
        .await.expect("couldn't count the admins");
    assert_eq!(count, 1);

    admins.delete(id).await.expect("couldn't revoke the admin mode");
    assert!(!admins.get(id).await);
    admins.delete(id).await.expect("couldn't revoke the admin mode twice");
    assert!(!admins.get(id).await);
}

#[tokio::test]
#[ignore]
async fn closed_pool() {
    let docker = clients::Cli::default();
    let (_container, db) = start_postgres(&docker).await;
    let admins = repo::Admins::new(db.clone());
    let id = AdminId::from(CHAT_ID);
    admins.set(id).await.expect("couldn't grant the admin mode");

    db.close().await;

    assert!(matches!(admins.set(id).await, Err(RegistryError::StoreUnavailable(_))));
    assert!(matches!(admins.delete(id).await, Err(RegistryError::StoreUnavailable(_))));
    assert!(!admins.get(id).await, "a store failure must read as 'not an admin'");
}

#[tokio::test]
async fn postgres_without_database_is_disabled() {
    let config = RegistryConfig {
        backend: RegistryBackend::Postgres,
        database: None,
    };
    let registry = repo::registry_from_config(&config).await;
    let id = AdminId::from(CHAT_ID);
    assert!(matches!(registry.set(id).await, Err(RegistryError::Unconfigured)));
    assert!(!registry.get(id).await);
}

#[tokio::test]
async fn memory_backend() {
    let config = RegistryConfig {
        backend: RegistryBackend::Memory,
        database: None,
    };
    let registry = repo::registry_from_config(&config).await;
    let id = AdminId::from(CHAT_ID);
    registry.set(id).await.expect("in-memory registry must not fail");
    assert!(registry.get(id).await);
}
