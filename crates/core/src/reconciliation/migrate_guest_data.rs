use super::gateway::{IServerGateway, MigratedPlant, MigratedWateringEvent};
use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::ID;
use plant_scheduler_infra::{SchedulerContext, StorageMode};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{info, warn};

/// Moves everything a guest stored on the device to the server account
/// of `user_id`. Runs against the local context.
///
/// Items are migrated one by one and a failing item is recorded in
/// `SyncResult::errors` without stopping the rest. Events of a plant that
/// failed to migrate are skipped. Clearing the device afterwards is up to
/// the caller.
pub struct MigrateGuestDataUseCase {
    pub user_id: ID,
    pub gateway: Arc<dyn IServerGateway>,
    /// Called once before any item, before every plant and event and
    /// once when done
    pub on_progress: Option<Box<dyn Fn(SyncProgress)>>,
}

impl MigrateGuestDataUseCase {
    pub fn new(user_id: ID, gateway: Arc<dyn IServerGateway>) -> Self {
        Self {
            user_id,
            gateway,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: impl Fn(SyncProgress) + 'static) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    fn report(&self, step: SyncStep, current: usize, total: usize) {
        if let Some(on_progress) = &self.on_progress {
            on_progress(SyncProgress::new(step, current, total));
        }
    }
}

impl fmt::Debug for MigrateGuestDataUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrateGuestDataUseCase")
            .field("user_id", &self.user_id)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStep {
    Starting,
    Plant(String),
    WateringEvent,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncProgress {
    pub step: SyncStep,
    pub current: usize,
    pub total: usize,
    /// Rounded, 100 once complete
    pub percentage: u8,
}

impl SyncProgress {
    fn new(step: SyncStep, current: usize, total: usize) -> Self {
        let percentage = if step == SyncStep::Complete {
            100
        } else if total == 0 {
            0
        } else {
            ((current * 100 + total / 2) / total).min(100) as u8
        };
        Self {
            step,
            current,
            total,
            percentage,
        }
    }
}

/// Local id to server id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdMapping {
    pub plants: HashMap<ID, ID>,
    pub watering_events: HashMap<ID, ID>,
}

#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// At least one plant or event made it. Check `errors` regardless.
    pub success: bool,
    pub plants_synced: usize,
    pub watering_events_synced: usize,
    pub photos_synced: usize,
    pub errors: Vec<String>,
    pub id_mapping: IdMapping,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotLocalContext,
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotLocalContext => Self::InvalidState(
                "Guest data can only be migrated from a local context".into(),
            ),
            UseCaseError::StorageError => Self::Internal("Unable to read guest data".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MigrateGuestDataUseCase {
    type Response = SyncResult;

    type Error = UseCaseError;

    const NAME: &'static str = "MigrateGuestData";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let storage = match (&ctx.mode, &ctx.local_storage) {
            (StorageMode::Local, Some(storage)) => storage,
            _ => return Err(UseCaseError::NotLocalContext),
        };
        let guest_id = storage
            .guest_owner_id()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let plants = ctx
            .repos
            .plants
            .find_by_user(&guest_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let events = ctx
            .repos
            .watering_events
            .find_by_user(&guest_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Migrating {} plants and {} watering events to user: {}",
            plants.len(),
            events.len(),
            self.user_id
        );

        let mut res = SyncResult::default();
        let total = plants.len() + events.len();
        let mut current = 0;
        self.report(SyncStep::Starting, current, total);

        for plant in &plants {
            current += 1;
            self.report(SyncStep::Plant(plant.name.clone()), current, total);
            match self
                .gateway
                .create_plant(&self.user_id, MigratedPlant::from(plant))
                .await
            {
                Ok(created) => {
                    res.plants_synced += 1;
                    res.photos_synced += created.photos.len();
                    res.id_mapping
                        .plants
                        .insert(plant.id.clone(), created.id);
                }
                Err(e) => {
                    warn!("Unable to migrate plant: {}. Error: {:?}", plant.id, e);
                    res.errors
                        .push(format!("Failed to migrate plant {}: {}", plant.name, e));
                }
            }
        }

        for event in &events {
            current += 1;
            self.report(SyncStep::WateringEvent, current, total);
            let plant_id = match res.id_mapping.plants.get(&event.plant_id) {
                Some(plant_id) => plant_id.clone(),
                None => {
                    res.errors.push(format!(
                        "Skipped watering event {}: its plant {} was not migrated",
                        event.id, event.plant_id
                    ));
                    continue;
                }
            };
            let migrated = MigratedWateringEvent {
                plant_id,
                scheduled_date: event.scheduled_date,
                status: event.status,
                completed_date: event.completed_date,
            };
            match self
                .gateway
                .create_watering_event(&self.user_id, migrated)
                .await
            {
                Ok(created) => {
                    res.watering_events_synced += 1;
                    res.id_mapping
                        .watering_events
                        .insert(event.id.clone(), created.id);
                }
                Err(e) => {
                    warn!("Unable to migrate watering event: {}. Error: {:?}", event.id, e);
                    res.errors
                        .push(format!("Failed to migrate watering event {}: {}", event.id, e));
                }
            }
        }

        res.success = res.plants_synced > 0 || res.watering_events_synced > 0;
        self.report(SyncStep::Complete, total, total);
        info!(
            "Migrated {} plants, {} watering events and {} photos with {} errors",
            res.plants_synced,
            res.watering_events_synced,
            res.photos_synced,
            res.errors.len()
        );

        Ok(res)
    }
}
