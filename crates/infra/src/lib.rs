mod config;
mod local_storage;
mod repos;
mod system;

pub use config::{Config, StorageMode};
pub use local_storage::{keys, LocalStorage};
pub use repos::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

/// Everything a use case needs to run. The storage mode is decided once,
/// when the context is built, and the repositories are chosen to match it.
#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mode: StorageMode,
    /// Present in `StorageMode::Local`
    pub local_storage: Option<LocalStorage>,
}

impl SchedulerContext {
    /// Server semantics backed by memory, used in tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
            mode: StorageMode::Server,
            local_storage: None,
        }
    }

    pub fn create_local(storage: LocalStorage) -> Self {
        Self {
            repos: Repos::create_local(storage.clone()),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
            mode: StorageMode::Local,
            local_storage: Some(storage),
        }
    }

    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        Ok(Self {
            repos: Repos::create_postgres(connection_string).await?,
            config: Config::default(),
            sys: Arc::new(RealSys {}),
            mode: StorageMode::Server,
            local_storage: None,
        })
    }

    pub fn with_sys(mut self, sys: Arc<dyn ISys>) -> Self {
        self.sys = sys;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<SchedulerContext> {
    let config = Config::new();
    let storage = LocalStorage::new(Arc::new(FileKeyValueStore::new(
        config.local_storage_dir.clone(),
    )));

    let mode = match config.storage_mode {
        Some(mode) => mode,
        None if storage.is_guest_mode().await => StorageMode::Local,
        None if config.database_url.is_some() => StorageMode::Server,
        None => StorageMode::Local,
    };
    info!("Using storage mode: {:?}", mode);

    let ctx = match mode {
        StorageMode::Server => {
            let connection_string = config.database_url.clone().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL env var must be present in server mode")
            })?;
            SchedulerContext::create_postgres(&connection_string).await?
        }
        StorageMode::Local => {
            storage.set_guest_mode(true).await?;
            SchedulerContext::create_local(storage)
        }
    };
    Ok(ctx.with_config(config))
}

pub async fn run_migration(connection_string: &str) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(())
}

/// Creates an inmemory server context and a local context. A postgres context
/// is added when `DATABASE_URL` is set.
#[cfg(test)]
pub(crate) async fn create_test_contexts() -> Vec<SchedulerContext> {
    let mut contexts = vec![
        SchedulerContext::create_inmemory(),
        SchedulerContext::create_local(LocalStorage::new(Arc::new(
            InMemoryKeyValueStore::new(),
        ))),
    ];
    if let Ok(connection_string) = std::env::var("DATABASE_URL") {
        run_migration(&connection_string)
            .await
            .expect("To run migrations");
        contexts.push(
            SchedulerContext::create_postgres(&connection_string)
                .await
                .expect("To connect to postgres"),
        );
    }
    contexts
}
