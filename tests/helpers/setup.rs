use chrono::NaiveDate;
use plant_scheduler_domain::{PlantSpecies, WaterNeed, ID};
use plant_scheduler_infra::{
    run_migration, FileKeyValueStore, InMemoryKeyValueStore, LocalStorage, SchedulerContext,
    StaticTimeSys,
};
use std::sync::Arc;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2024, 3, 15)
}

/// Contexts for every backend. The directory backing the file store lives
/// as long as this value.
pub struct TestContexts {
    pub contexts: Vec<SchedulerContext>,
    _dir: TempDir,
}

/// An inmemory server context, a local context on top of a file store and
/// a postgres context when `DATABASE_URL` is set. All frozen at `today()`.
pub async fn create_contexts() -> TestContexts {
    let dir = tempfile::tempdir().expect("To create a temp dir");
    let sys = Arc::new(StaticTimeSys::new(today()));

    let mut contexts = vec![
        SchedulerContext::create_inmemory().with_sys(sys.clone()),
        create_local_context(&dir),
    ];
    if let Ok(connection_string) = std::env::var("DATABASE_URL") {
        run_migration(&connection_string)
            .await
            .expect("To run migrations");
        let ctx = SchedulerContext::create_postgres(&connection_string)
            .await
            .expect("To connect to postgres");
        contexts.push(ctx.with_sys(sys));
    }

    TestContexts {
        contexts,
        _dir: dir,
    }
}

pub fn create_local_context(dir: &TempDir) -> SchedulerContext {
    let storage = LocalStorage::new(Arc::new(FileKeyValueStore::new(dir.path().join("device"))));
    SchedulerContext::create_local(storage).with_sys(Arc::new(StaticTimeSys::new(today())))
}

pub fn create_inmemory_local_context() -> SchedulerContext {
    let storage = LocalStorage::new(Arc::new(InMemoryKeyValueStore::new()));
    SchedulerContext::create_local(storage).with_sys(Arc::new(StaticTimeSys::new(today())))
}

pub async fn insert_species(ctx: &SchedulerContext, need: WaterNeed) -> PlantSpecies {
    let species = PlantSpecies::new(
        &format!("{:?} species {}", need, ID::default()),
        "Planta probationis",
        need,
    );
    ctx.repos
        .species
        .insert(&species)
        .await
        .expect("To insert species");
    species
}
