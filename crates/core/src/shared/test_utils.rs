use chrono::NaiveDate;
use plant_scheduler_domain::{Plant, PlantSpecies, WaterNeed, WateringEvent, ID};
use plant_scheduler_infra::{
    InMemoryKeyValueStore, LocalStorage, SchedulerContext, StaticTimeSys,
};
use std::sync::Arc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The frozen "today" of every test context
pub fn today() -> NaiveDate {
    date(2024, 3, 15)
}

/// An inmemory server context and a local context, both frozen at `today()`
pub fn create_contexts() -> Vec<SchedulerContext> {
    let sys = Arc::new(StaticTimeSys::new(today()));
    vec![
        SchedulerContext::create_inmemory().with_sys(sys.clone()),
        SchedulerContext::create_local(LocalStorage::new(Arc::new(InMemoryKeyValueStore::new())))
            .with_sys(sys),
    ]
}

pub async fn insert_species(ctx: &SchedulerContext, need: WaterNeed) -> PlantSpecies {
    let species = PlantSpecies::new(
        &format!("Species {}", ID::default()),
        "Planta testis",
        need,
    );
    ctx.repos.species.insert(&species).await.unwrap();
    species
}

pub async fn insert_plant(
    ctx: &SchedulerContext,
    user_id: &ID,
    species: Option<&PlantSpecies>,
) -> Plant {
    let mut plant = Plant::new(user_id.clone(), "Monstera".into(), 0);
    plant.species_id = species.map(|s| s.id.clone());
    ctx.repos.plants.insert(&plant).await.unwrap();
    plant
}

pub async fn insert_pending_event(
    ctx: &SchedulerContext,
    plant: &Plant,
    scheduled_date: NaiveDate,
) -> WateringEvent {
    let event = WateringEvent::new_pending(plant.id.clone(), scheduled_date, 0);
    ctx.repos.watering_events.insert(&event).await.unwrap();
    event
}
