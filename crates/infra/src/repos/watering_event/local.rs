use super::{last_watered, sort_by_schedule, IWateringEventRepo};
use crate::local_storage::{keys, LocalStorage};
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringAction, WateringEvent, ID};
use tracing::error;

/// Watering events stored on the device as one JSON array.
/// The user filters of `IWateringEventRepo` are ignored, everything on the
/// device belongs to the guest.
pub struct LocalWateringEventRepo {
    storage: LocalStorage,
}

impl LocalWateringEventRepo {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    async fn read_all(&self) -> anyhow::Result<Vec<WateringEvent>> {
        self.storage.read_array(keys::GUEST_WATER_EVENTS).await
    }

    async fn find_by<F: Fn(&WateringEvent) -> bool>(
        &self,
        compare: F,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        let mut events: Vec<_> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|e| compare(e))
            .collect();
        sort_by_schedule(&mut events);
        Ok(events)
    }

    async fn delete_by<F: Fn(&WateringEvent) -> bool>(
        &self,
        compare: F,
    ) -> anyhow::Result<DeleteResult> {
        self.storage
            .update_array(keys::GUEST_WATER_EVENTS, |events: &mut Vec<WateringEvent>| {
                let before = events.len();
                events.retain(|e| !compare(e));
                DeleteResult {
                    deleted_count: (before - events.len()) as i64,
                }
            })
            .await
    }
}

#[async_trait::async_trait]
impl IWateringEventRepo for LocalWateringEventRepo {
    async fn insert(&self, event: &WateringEvent) -> anyhow::Result<()> {
        self.storage
            .update_array(keys::GUEST_WATER_EVENTS, |events: &mut Vec<WateringEvent>| {
                events.push(event.clone())
            })
            .await
    }

    async fn find(&self, event_id: &ID) -> Option<WateringEvent> {
        match self.read_all().await {
            Ok(events) => events.into_iter().find(|e| e.id == *event_id),
            Err(e) => {
                error!("Unable to read local watering events. Error: {:?}", e);
                None
            }
        }
    }

    async fn find_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        self.find_by(|e| e.plant_id == *plant_id && e.is_pending())
            .await
    }

    async fn delete_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        self.delete_by(|e| e.plant_id == *plant_id && e.is_pending())
            .await
    }

    async fn find_last_watered_by_plant(&self, plant_id: &ID) -> Option<WateringEvent> {
        match self.read_all().await {
            Ok(events) => last_watered(events.into_iter().filter(|e| e.plant_id == *plant_id)),
            Err(e) => {
                error!("Unable to read local watering events. Error: {:?}", e);
                None
            }
        }
    }

    async fn find_in_range(
        &self,
        _user_id: &ID,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        self.find_by(|e| e.is_scheduled_within(start, end)).await
    }

    async fn find_overdue(
        &self,
        _user_id: &ID,
        as_of: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        self.find_by(|e| e.is_overdue(as_of)).await
    }

    async fn resolve_pending(
        &self,
        event_id: &ID,
        action: WateringAction,
        completed_date: NaiveDate,
        updated: i64,
    ) -> anyhow::Result<Option<WateringEvent>> {
        self.storage
            .update_array(keys::GUEST_WATER_EVENTS, |events: &mut Vec<WateringEvent>| {
                let event = events.iter_mut().find(|e| e.id == *event_id)?;
                if event.resolve(action, completed_date, updated) {
                    Some(event.clone())
                } else {
                    None
                }
            })
            .await
    }

    async fn find_by_user(&self, _user_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        self.find_by(|_| true).await
    }

    async fn delete_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        self.delete_by(|e| e.plant_id == *plant_id).await
    }
}
