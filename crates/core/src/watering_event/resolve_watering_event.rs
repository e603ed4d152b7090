use super::find_water_need;
use crate::error::SchedulerError;
use crate::shared::{side_effect::SideEffect, usecase::UseCase};
use chrono::NaiveDate;
use plant_scheduler_domain::{
    next_scheduled_date, parse_date, WateringAction, WateringEvent, ID,
};
use plant_scheduler_infra::SchedulerContext;
use tracing::{error, warn};

/// Waters or postpones a pending event and schedules the one after it
#[derive(Debug)]
pub struct ResolveWateringEventUseCase {
    pub event_id: ID,
    pub user_id: ID,
    pub action: WateringAction,
    /// Defaults to today
    pub completed_date: Option<NaiveDate>,
}

impl ResolveWateringEventUseCase {
    /// Builds the use case from raw client input
    pub fn parse(
        event_id: ID,
        user_id: ID,
        action: &str,
        completed_date: Option<&str>,
    ) -> Result<Self, SchedulerError> {
        Ok(Self {
            event_id,
            user_id,
            action: action.parse()?,
            completed_date: completed_date.map(parse_date).transpose()?,
        })
    }
}

#[derive(Debug)]
pub struct ResolvedWateringEvent {
    pub event: WateringEvent,
    /// The successor pending event
    pub next_event: SideEffect<WateringEvent>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden(ID),
    NotPending(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The watering event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::Forbidden(event_id) => Self::Forbidden(format!(
                "Not allowed to modify the watering event with id: {}.",
                event_id
            )),
            UseCaseError::NotPending(event_id) => Self::InvalidState(format!(
                "The watering event with id: {}, is already resolved.",
                event_id
            )),
            UseCaseError::StorageError => Self::Internal("Unable to resolve watering event".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResolveWateringEventUseCase {
    type Response = ResolvedWateringEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "ResolveWateringEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .watering_events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        let plant = ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &event.plant_id)
            .await
            .ok_or_else(|| UseCaseError::Forbidden(self.event_id.clone()))?;

        if !event.is_pending() {
            return Err(UseCaseError::NotPending(self.event_id.clone()));
        }

        let completed_date = self.completed_date.unwrap_or_else(|| ctx.sys.today());
        let event = ctx
            .repos
            .watering_events
            .resolve_pending(
                &event.id,
                self.action,
                completed_date,
                ctx.sys.get_timestamp_millis(),
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?
            // Another request resolved it after our read
            .ok_or_else(|| UseCaseError::NotPending(self.event_id.clone()))?;

        let next_event = match find_water_need(&plant, ctx).await {
            Some(need) => {
                let next = WateringEvent::new_pending(
                    plant.id.clone(),
                    next_scheduled_date(completed_date, need, self.action),
                    ctx.sys.get_timestamp_millis(),
                );
                match ctx.repos.watering_events.insert(&next).await {
                    Ok(_) => SideEffect::Applied(next),
                    Err(e) => {
                        error!(
                            "Unable to schedule the watering after event: {}. Error: {:?}",
                            event.id, e
                        );
                        SideEffect::Failed(e.to_string())
                    }
                }
            }
            None => {
                warn!(
                    "Plant: {} has no species, not scheduling the watering after event: {}",
                    plant.id, event.id
                );
                SideEffect::NotApplicable
            }
        };

        Ok(ResolvedWateringEvent { event, next_event })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;
    use crate::shared::usecase::execute;
    use plant_scheduler_domain::{Entity, WaterNeed, WateringEventStatus};
    use plant_scheduler_infra::{
        DeleteResult, IWateringEventRepo, SchedulerContext, StorageMode,
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn resolve(
        event: &WateringEvent,
        user_id: &ID,
        action: WateringAction,
        completed_date: NaiveDate,
    ) -> ResolveWateringEventUseCase {
        ResolveWateringEventUseCase {
            event_id: event.id.clone(),
            user_id: user_id.clone(),
            action,
            completed_date: Some(completed_date),
        }
    }

    #[tokio::test]
    async fn watered_event_schedules_next_watering() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::High).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let res = resolve(&event, &user_id, WateringAction::Watered, date(2024, 3, 12))
                .execute(&ctx)
                .await
                .unwrap();

            assert_eq!(res.event.status, WateringEventStatus::Watered);
            assert_eq!(res.event.completed_date, Some(date(2024, 3, 12)));
            assert_eq!(res.event.scheduled_date, date(2024, 3, 10));

            let next = res.next_event.applied().expect("To schedule the next event");
            assert_eq!(next.scheduled_date, date(2024, 3, 16));
            assert!(next.is_pending());

            let pending = ctx
                .repos
                .watering_events
                .find_pending_by_plant(&plant.id)
                .await
                .unwrap();
            assert_eq!(pending.len(), 1);
            assert!(pending[0].eq(&next));
        }
    }

    #[tokio::test]
    async fn postponed_event_schedules_sooner() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::High).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let res = resolve(&event, &user_id, WateringAction::Postponed, date(2024, 3, 12))
                .execute(&ctx)
                .await
                .unwrap();

            assert_eq!(res.event.status, WateringEventStatus::Postponed);
            let next = res.next_event.applied().unwrap();
            assert_eq!(next.scheduled_date, date(2024, 3, 14));
        }
    }

    #[tokio::test]
    async fn defaults_completed_date_to_today() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::Low).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let mut usecase =
                ResolveWateringEventUseCase::parse(event.id.clone(), user_id, "WATERED", None)
                    .unwrap();
            let res = usecase.execute(&ctx).await.unwrap();

            assert_eq!(res.event.completed_date, Some(today()));
            assert_eq!(res.next_event.applied().unwrap().scheduled_date, date(2024, 4, 14));
        }
    }

    #[tokio::test]
    async fn rejects_resolving_twice() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::Medium).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            assert!(resolve(&event, &user_id, WateringAction::Watered, date(2024, 3, 12))
                .execute(&ctx)
                .await
                .is_ok());

            for action in &[WateringAction::Watered, WateringAction::Postponed] {
                let res = resolve(&event, &user_id, *action, date(2024, 3, 13))
                    .execute(&ctx)
                    .await;
                assert_eq!(res.unwrap_err(), UseCaseError::NotPending(event.id.clone()));
            }

            // Only the successor of the first resolution exists
            let pending = ctx
                .repos
                .watering_events
                .find_pending_by_plant(&plant.id)
                .await
                .unwrap();
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].scheduled_date, date(2024, 3, 26));
        }
    }

    #[tokio::test]
    async fn concurrent_resolves_only_succeed_once() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::High).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            // Both requests read the pending event before either of them writes
            let repo =
                Arc::new(FaultyRepo::new(ctx.repos.watering_events.clone()).yield_after_find());
            let mut racing_ctx: SchedulerContext = ctx.clone();
            racing_ctx.repos.watering_events = repo.clone();

            let (first, second) = tokio::join!(
                execute(
                    resolve(&event, &user_id, WateringAction::Watered, date(2024, 3, 12)),
                    &racing_ctx
                ),
                execute(
                    resolve(&event, &user_id, WateringAction::Postponed, date(2024, 3, 12)),
                    &racing_ctx
                ),
            );

            assert_eq!(repo.resolve_calls.load(Ordering::SeqCst), 2);
            assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
            let err = first.as_ref().err().or_else(|| second.as_ref().err()).unwrap();
            assert_eq!(*err, UseCaseError::NotPending(event.id.clone()));

            let winner = first.or(second).unwrap();
            let stored = ctx.repos.watering_events.find(&event.id).await.unwrap();
            assert_eq!(stored.status, winner.event.status);

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
    async fn rejects_unknown_event() {
        for ctx in create_contexts() {
            let event_id = ID::default();
            let mut usecase = ResolveWateringEventUseCase {
                event_id: event_id.clone(),
                user_id: ID::default(),
                action: WateringAction::Watered,
                completed_date: None,
            };
            let res = usecase.execute(&ctx).await;
            assert_eq!(res.unwrap_err(), UseCaseError::NotFound(event_id));
        }
    }

    #[tokio::test]
    async fn rejects_other_users_event_on_server() {
        for ctx in create_contexts() {
            let species = insert_species(&ctx, WaterNeed::High).await;
            let plant = insert_plant(&ctx, &ID::default(), Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let res = resolve(&event, &ID::default(), WateringAction::Watered, date(2024, 3, 12))
                .execute(&ctx)
                .await;

            match ctx.mode {
                StorageMode::Server => {
                    assert_eq!(res.unwrap_err(), UseCaseError::Forbidden(event.id.clone()));
                    let stored = ctx.repos.watering_events.find(&event.id).await.unwrap();
                    assert!(stored.is_pending());
                }
                // Everything on the device belongs to the guest
                StorageMode::Local => assert!(res.is_ok()),
            }
        }
    }

    #[tokio::test]
    async fn resolves_without_successor_when_plant_has_no_species() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let plant = insert_plant(&ctx, &user_id, None).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let res = resolve(&event, &user_id, WateringAction::Watered, date(2024, 3, 12))
                .execute(&ctx)
                .await
                .unwrap();

            assert_eq!(res.event.status, WateringEventStatus::Watered);
            assert!(matches!(res.next_event, SideEffect::NotApplicable));
            assert!(ctx
                .repos
                .watering_events
                .find_pending_by_plant(&plant.id)
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[test]
    fn rejects_malformed_input() {
        let res = ResolveWateringEventUseCase::parse(ID::default(), ID::default(), "SKIPPED", None);
        assert!(matches!(res, Err(SchedulerError::Validation(_))));

        let res = ResolveWateringEventUseCase::parse(
            ID::default(),
            ID::default(),
            "POSTPONED",
            Some("2024-13-01"),
        );
        assert!(matches!(res, Err(SchedulerError::Validation(_))));

        let res = ResolveWateringEventUseCase::parse(
            ID::default(),
            ID::default(),
            "POSTPONED",
            Some("2024-03-12T23:30:00.000Z"),
        )
        .unwrap();
        assert_eq!(res.completed_date, Some(date(2024, 3, 12)));
    }

    /// Delegates to an inner repo, optionally failing inserts or
    /// suspending the task right after every read
    struct FaultyRepo {
        inner: Arc<dyn IWateringEventRepo>,
        fail_inserts: bool,
        yield_after_find: bool,
        resolve_calls: AtomicUsize,
    }

    impl FaultyRepo {
        fn new(inner: Arc<dyn IWateringEventRepo>) -> Self {
            Self {
                inner,
                fail_inserts: false,
                yield_after_find: false,
                resolve_calls: AtomicUsize::new(0),
            }
        }

        fn fail_inserts(mut self) -> Self {
            self.fail_inserts = true;
            self
        }

        fn yield_after_find(mut self) -> Self {
            self.yield_after_find = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl IWateringEventRepo for FaultyRepo {
        async fn insert(&self, event: &WateringEvent) -> anyhow::Result<()> {
            if self.fail_inserts {
                return Err(anyhow::anyhow!("Storage is unavailable"));
            }
            self.inner.insert(event).await
        }
        async fn find(&self, event_id: &ID) -> Option<WateringEvent> {
            let event = self.inner.find(event_id).await;
            if self.yield_after_find {
                tokio::task::yield_now().await;
            }
            event
        }
        async fn find_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
            self.inner.find_pending_by_plant(plant_id).await
        }
        async fn delete_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
            self.inner.delete_pending_by_plant(plant_id).await
        }
        async fn find_last_watered_by_plant(&self, plant_id: &ID) -> Option<WateringEvent> {
            self.inner.find_last_watered_by_plant(plant_id).await
        }
        async fn find_in_range(
            &self,
            user_id: &ID,
            start: NaiveDate,
            end: NaiveDate,
        ) -> anyhow::Result<Vec<WateringEvent>> {
            self.inner.find_in_range(user_id, start, end).await
        }
        async fn find_overdue(
            &self,
            user_id: &ID,
            as_of: NaiveDate,
        ) -> anyhow::Result<Vec<WateringEvent>> {
            self.inner.find_overdue(user_id, as_of).await
        }
        async fn resolve_pending(
            &self,
            event_id: &ID,
            action: WateringAction,
            completed_date: NaiveDate,
            updated: i64,
        ) -> anyhow::Result<Option<WateringEvent>> {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            self.inner
                .resolve_pending(event_id, action, completed_date, updated)
                .await
        }
        async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
            self.inner.find_by_user(user_id).await
        }
        async fn delete_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
            self.inner.delete_by_plant(plant_id).await
        }
    }

    #[tokio::test]
    async fn failed_successor_keeps_the_resolution() {
        for ctx in create_contexts() {
            let user_id = ID::default();
            let species = insert_species(&ctx, WaterNeed::High).await;
            let plant = insert_plant(&ctx, &user_id, Some(&species)).await;
            let event = insert_pending_event(&ctx, &plant, date(2024, 3, 10)).await;

            let mut failing_ctx: SchedulerContext = ctx.clone();
            failing_ctx.repos.watering_events =
                Arc::new(FaultyRepo::new(ctx.repos.watering_events.clone()).fail_inserts());

            let res = resolve(&event, &user_id, WateringAction::Watered, date(2024, 3, 12))
                .execute(&failing_ctx)
                .await
                .unwrap();

            assert!(res.next_event.is_failed());
            let stored = ctx.repos.watering_events.find(&event.id).await.unwrap();
            assert_eq!(stored.status, WateringEventStatus::Watered);
            assert!(ctx
                .repos
                .watering_events
                .find_pending_by_plant(&plant.id)
                .await
                .unwrap()
                .is_empty());
        }
    }
}
