mod inmemory;
mod local;
mod postgres;

pub use inmemory::InMemoryWateringEventRepo;
pub use local::LocalWateringEventRepo;
pub use postgres::PostgresWateringEventRepo;

use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringAction, WateringEvent, ID};

/// Storage of `WateringEvent`s. Every method returning a list returns it
/// sorted ascending by `scheduled_date`.
#[async_trait::async_trait]
pub trait IWateringEventRepo: Send + Sync {
    async fn insert(&self, event: &WateringEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<WateringEvent>;
    async fn find_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<Vec<WateringEvent>>;
    async fn delete_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult>;
    /// The `Watered` event with the latest `completed_date`
    async fn find_last_watered_by_plant(&self, plant_id: &ID) -> Option<WateringEvent>;
    /// Events of any status scheduled within `start` and `end`, both inclusive
    async fn find_in_range(
        &self,
        user_id: &ID,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>>;
    /// Pending events scheduled strictly before `as_of`
    async fn find_overdue(
        &self,
        user_id: &ID,
        as_of: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>>;
    /// Moves the event out of `Pending` if, and only if, it is still pending
    /// at the time of the write. Returns `None` when no pending event matched,
    /// which means it does not exist or another request resolved it first.
    async fn resolve_pending(
        &self,
        event_id: &ID,
        action: WateringAction,
        completed_date: NaiveDate,
        updated: i64,
    ) -> anyhow::Result<Option<WateringEvent>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<WateringEvent>>;
    async fn delete_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult>;
}

fn sort_by_schedule(events: &mut Vec<WateringEvent>) {
    events.sort_by(|a, b| {
        a.scheduled_date
            .cmp(&b.scheduled_date)
            .then(a.created.cmp(&b.created))
    });
}

fn last_watered(events: impl Iterator<Item = WateringEvent>) -> Option<WateringEvent> {
    events
        .filter(|e| e.status == plant_scheduler_domain::WateringEventStatus::Watered)
        .max_by(|a, b| {
            a.completed_date
                .cmp(&b.completed_date)
                .then(a.updated.cmp(&b.updated))
        })
}

#[cfg(test)]
mod tests {
    use crate::{create_test_contexts, SchedulerContext, StorageMode};
    use chrono::NaiveDate;
    use plant_scheduler_domain::{
        Entity, Plant, WateringAction, WateringEvent, WateringEventStatus, ID,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn insert_plant(ctx: &SchedulerContext, user_id: &ID) -> Plant {
        let plant = Plant::new(user_id.clone(), "Fern".into(), 0);
        ctx.repos.plants.insert(&plant).await.unwrap();
        plant
    }

    #[tokio::test]
    async fn create_and_find() {
        for ctx in create_test_contexts().await {
            let plant = insert_plant(&ctx, &ID::default()).await;
            let event = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 10), 0);

            assert!(ctx.repos.watering_events.insert(&event).await.is_ok());

            let res = ctx
                .repos
                .watering_events
                .find(&event.id)
                .await
                .expect("To find event");
            assert!(res.eq(&event));
            assert_eq!(res.scheduled_date, date(2024, 3, 10));
            assert_eq!(res.status, WateringEventStatus::Pending);
            assert!(res.completed_date.is_none());

            let pending = ctx
                .repos
                .watering_events
                .find_pending_by_plant(&plant.id)
                .await
                .unwrap();
            assert_eq!(pending.len(), 1);
        }
    }

    #[tokio::test]
    async fn resolves_pending_event_only_once() {
        for ctx in create_test_contexts().await {
            let plant = insert_plant(&ctx, &ID::default()).await;
            let event = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 10), 0);
            ctx.repos.watering_events.insert(&event).await.unwrap();

            let resolved = ctx
                .repos
                .watering_events
                .resolve_pending(&event.id, WateringAction::Watered, date(2024, 3, 12), 5)
                .await
                .unwrap()
                .expect("To resolve pending event");
            assert_eq!(resolved.status, WateringEventStatus::Watered);
            assert_eq!(resolved.completed_date, Some(date(2024, 3, 12)));
            assert_eq!(resolved.updated, 5);

            let second = ctx
                .repos
                .watering_events
                .resolve_pending(&event.id, WateringAction::Postponed, date(2024, 3, 13), 6)
                .await
                .unwrap();
            assert!(second.is_none());

            let stored = ctx.repos.watering_events.find(&event.id).await.unwrap();
            assert_eq!(stored.status, WateringEventStatus::Watered);
            assert_eq!(stored.completed_date, Some(date(2024, 3, 12)));

            let missing = ctx
                .repos
                .watering_events
                .resolve_pending(&ID::default(), WateringAction::Watered, date(2024, 3, 12), 5)
                .await
                .unwrap();
            assert!(missing.is_none());
        }
    }

    #[tokio::test]
    async fn deletes_only_pending_events_of_plant() {
        for ctx in create_test_contexts().await {
            let user_id = ID::default();
            let plant = insert_plant(&ctx, &user_id).await;
            let other_plant = insert_plant(&ctx, &user_id).await;

            let mut done = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 1), 0);
            done.resolve(WateringAction::Watered, date(2024, 3, 1), 0);
            let pending = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 5), 0);
            let other = WateringEvent::new_pending(other_plant.id.clone(), date(2024, 3, 5), 0);
            for e in &[&done, &pending, &other] {
                ctx.repos.watering_events.insert(e).await.unwrap();
            }

            let res = ctx
                .repos
                .watering_events
                .delete_pending_by_plant(&plant.id)
                .await
                .unwrap();
            assert_eq!(res.deleted_count, 1);
            assert!(ctx.repos.watering_events.find(&done.id).await.is_some());
            assert!(ctx.repos.watering_events.find(&pending.id).await.is_none());
            assert!(ctx.repos.watering_events.find(&other.id).await.is_some());

            let res = ctx
                .repos
                .watering_events
                .delete_by_plant(&plant.id)
                .await
                .unwrap();
            assert_eq!(res.deleted_count, 1);
            assert!(ctx.repos.watering_events.find(&done.id).await.is_none());
        }
    }

    #[tokio::test]
    async fn finds_last_watered_by_completed_date() {
        for ctx in create_test_contexts().await {
            let plant = insert_plant(&ctx, &ID::default()).await;

            let mut later = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 1), 0);
            later.resolve(WateringAction::Watered, date(2024, 3, 20), 0);
            let mut earlier = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 10), 0);
            earlier.resolve(WateringAction::Watered, date(2024, 3, 11), 0);
            let mut postponed = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 25), 0);
            postponed.resolve(WateringAction::Postponed, date(2024, 3, 26), 0);
            for e in &[&later, &earlier, &postponed] {
                ctx.repos.watering_events.insert(e).await.unwrap();
            }

            let res = ctx
                .repos
                .watering_events
                .find_last_watered_by_plant(&plant.id)
                .await
                .expect("To find last watered event");
            assert!(res.eq(&later));
        }
    }

    #[tokio::test]
    async fn range_and_overdue_queries() {
        for ctx in create_test_contexts().await {
            let user_id = ID::default();
            let plant = insert_plant(&ctx, &user_id).await;
            let stranger_plant = insert_plant(&ctx, &ID::default()).await;

            let e1 = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 20), 0);
            let mut e2 = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 10), 0);
            e2.resolve(WateringAction::Postponed, date(2024, 3, 10), 0);
            let e3 = WateringEvent::new_pending(plant.id.clone(), date(2024, 3, 1), 0);
            let e4 = WateringEvent::new_pending(plant.id.clone(), date(2024, 4, 1), 0);
            let foreign = WateringEvent::new_pending(stranger_plant.id.clone(), date(2024, 3, 5), 0);
            for e in &[&e1, &e2, &e3, &e4, &foreign] {
                ctx.repos.watering_events.insert(e).await.unwrap();
            }

            let in_range = ctx
                .repos
                .watering_events
                .find_in_range(&user_id, date(2024, 3, 1), date(2024, 3, 20))
                .await
                .unwrap();
            let overdue = ctx
                .repos
                .watering_events
                .find_overdue(&user_id, date(2024, 3, 20))
                .await
                .unwrap();

            match ctx.mode {
                StorageMode::Server => {
                    assert_eq!(in_range.len(), 3);
                    assert!(in_range[0].eq(&e3));
                    assert!(in_range[1].eq(&e2));
                    assert!(in_range[2].eq(&e1));

                    assert_eq!(overdue.len(), 1);
                    assert!(overdue[0].eq(&e3));
                }
                StorageMode::Local => {
                    // Single implicit owner on the device
                    assert_eq!(in_range.len(), 4);
                    assert!(in_range[1].eq(&foreign));
                    assert_eq!(overdue.len(), 2);
                }
            }

            let all = ctx.repos.watering_events.find_by_user(&user_id).await.unwrap();
            let expected = match ctx.mode {
                StorageMode::Server => 4,
                StorageMode::Local => 5,
            };
            assert_eq!(all.len(), expected);
            assert!(all
                .windows(2)
                .all(|w| w[0].scheduled_date <= w[1].scheduled_date));
        }
    }
}
