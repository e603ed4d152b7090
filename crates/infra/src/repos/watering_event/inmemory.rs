use super::{last_watered, sort_by_schedule, IWateringEventRepo};
use crate::repos::{plant::InMemoryPlantRepo, shared::inmemory_repo::*, shared::repo::DeleteResult};
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringAction, WateringEvent, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryWateringEventRepo {
    events: Mutex<Vec<WateringEvent>>,
    /// Owner lookups go through the plants, like the join in the database
    plants: Arc<InMemoryPlantRepo>,
}

impl InMemoryWateringEventRepo {
    pub fn new(plants: Arc<InMemoryPlantRepo>) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            plants,
        }
    }

    fn find_by_owner<F: Fn(&WateringEvent) -> bool>(
        &self,
        user_id: &ID,
        compare: F,
    ) -> Vec<WateringEvent> {
        let plant_ids = self.plants.plant_ids_of_user(user_id);
        let mut events = find_by(&self.events, |e| {
            plant_ids.contains(&e.plant_id) && compare(e)
        });
        sort_by_schedule(&mut events);
        events
    }
}

#[async_trait::async_trait]
impl IWateringEventRepo for InMemoryWateringEventRepo {
    async fn insert(&self, event: &WateringEvent) -> anyhow::Result<()> {
        insert(event, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<WateringEvent> {
        find(event_id, &self.events)
    }

    async fn find_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        let mut events = find_by(&self.events, |e| e.plant_id == *plant_id && e.is_pending());
        sort_by_schedule(&mut events);
        Ok(events)
    }

    async fn delete_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.events, |e| {
            e.plant_id == *plant_id && e.is_pending()
        }))
    }

    async fn find_last_watered_by_plant(&self, plant_id: &ID) -> Option<WateringEvent> {
        last_watered(find_by(&self.events, |e| e.plant_id == *plant_id).into_iter())
    }

    async fn find_in_range(
        &self,
        user_id: &ID,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        Ok(self.find_by_owner(user_id, |e| e.is_scheduled_within(start, end)))
    }

    async fn find_overdue(
        &self,
        user_id: &ID,
        as_of: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        Ok(self.find_by_owner(user_id, |e| e.is_overdue(as_of)))
    }

    async fn resolve_pending(
        &self,
        event_id: &ID,
        action: WateringAction,
        completed_date: NaiveDate,
        updated: i64,
    ) -> anyhow::Result<Option<WateringEvent>> {
        let res = update_one(event_id, &self.events, |e| {
            e.resolve(action, completed_date, updated)
        });
        Ok(match res {
            Some((true, event)) => Some(event),
            _ => None,
        })
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        Ok(self.find_by_owner(user_id, |_| true))
    }

    async fn delete_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.events, |e| e.plant_id == *plant_id))
    }
}
