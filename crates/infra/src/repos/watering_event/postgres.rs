use super::IWateringEventRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringAction, WateringEvent, WateringEventStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresWateringEventRepo {
    pool: PgPool,
}

impl PostgresWateringEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WateringEventRaw {
    event_uid: Uuid,
    plant_uid: Uuid,
    scheduled_date: NaiveDate,
    status: String,
    completed_date: Option<NaiveDate>,
    created: i64,
    updated: i64,
}

impl TryFrom<WateringEventRaw> for WateringEvent {
    type Error = anyhow::Error;

    fn try_from(e: WateringEventRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.event_uid.into(),
            plant_id: e.plant_uid.into(),
            scheduled_date: e.scheduled_date,
            status: e.status.parse::<WateringEventStatus>()?,
            completed_date: e.completed_date,
            created: e.created,
            updated: e.updated,
        })
    }
}

fn into_events(raw: Vec<WateringEventRaw>) -> anyhow::Result<Vec<WateringEvent>> {
    raw.into_iter().map(WateringEvent::try_from).collect()
}

fn into_event(raw: Option<WateringEventRaw>, context: &str) -> Option<WateringEvent> {
    match raw.map(WateringEvent::try_from) {
        Some(Ok(event)) => Some(event),
        Some(Err(e)) => {
            error!("{} returned a malformed watering event. Error: {:?}", context, e);
            None
        }
        None => None,
    }
}

#[async_trait::async_trait]
impl IWateringEventRepo for PostgresWateringEventRepo {
    async fn insert(&self, event: &WateringEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO watering_events(
                event_uid,
                plant_uid,
                scheduled_date,
                status,
                completed_date,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*event.id.inner_ref())
        .bind(*event.plant_id.inner_ref())
        .bind(event.scheduled_date)
        .bind(event.status.as_str())
        .bind(event.completed_date)
        .bind(event.created)
        .bind(event.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert watering event: {:?}. DB returned error: {:?}",
                event, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<WateringEvent> {
        let res: Option<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM watering_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(*event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find watering event with id: {} failed. DB returned error: {:?}",
                event_id, e
            );
            None
        });
        into_event(res, "Find watering event")
    }

    async fn find_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        let events: Vec<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM watering_events AS e
            WHERE e.plant_uid = $1 AND e.status = 'PENDING'
            ORDER BY e.scheduled_date ASC, e.created ASC
            "#,
        )
        .bind(*plant_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        into_events(events)
    }

    async fn delete_pending_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM watering_events AS e
            WHERE e.plant_uid = $1 AND e.status = 'PENDING'
            "#,
        )
        .bind(*plant_id.inner_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to delete pending watering events of plant: {}. DB returned error: {:?}",
                plant_id, e
            );
            e
        })?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn find_last_watered_by_plant(&self, plant_id: &ID) -> Option<WateringEvent> {
        let res: Option<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM watering_events AS e
            WHERE e.plant_uid = $1 AND e.status = 'WATERED'
            ORDER BY e.completed_date DESC NULLS LAST, e.updated DESC
            LIMIT 1
            "#,
        )
        .bind(*plant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find last watered event of plant: {} failed. DB returned error: {:?}",
                plant_id, e
            );
            None
        });
        into_event(res, "Find last watered event")
    }

    async fn find_in_range(
        &self,
        user_id: &ID,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        let events: Vec<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT e.* FROM watering_events AS e
            INNER JOIN plants AS p
                ON p.plant_uid = e.plant_uid
            WHERE p.user_uid = $1 AND
            e.scheduled_date >= $2 AND
            e.scheduled_date <= $3
            ORDER BY e.scheduled_date ASC, e.created ASC
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        into_events(events)
    }

    async fn find_overdue(
        &self,
        user_id: &ID,
        as_of: NaiveDate,
    ) -> anyhow::Result<Vec<WateringEvent>> {
        let events: Vec<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT e.* FROM watering_events AS e
            INNER JOIN plants AS p
                ON p.plant_uid = e.plant_uid
            WHERE p.user_uid = $1 AND
            e.status = 'PENDING' AND
            e.scheduled_date < $2
            ORDER BY e.scheduled_date ASC, e.created ASC
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        into_events(events)
    }

    async fn resolve_pending(
        &self,
        event_id: &ID,
        action: WateringAction,
        completed_date: NaiveDate,
        updated: i64,
    ) -> anyhow::Result<Option<WateringEvent>> {
        let res: Option<WateringEventRaw> = sqlx::query_as(
            r#"
            UPDATE watering_events SET
                status = $2,
                completed_date = $3,
                updated = $4
            WHERE event_uid = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(action.resolved_status().as_str())
        .bind(completed_date)
        .bind(updated)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to resolve watering event: {}. DB returned error: {:?}",
                event_id, e
            );
            e
        })?;
        res.map(WateringEvent::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<WateringEvent>> {
        let events: Vec<WateringEventRaw> = sqlx::query_as(
            r#"
            SELECT e.* FROM watering_events AS e
            INNER JOIN plants AS p
                ON p.plant_uid = e.plant_uid
            WHERE p.user_uid = $1
            ORDER BY e.scheduled_date ASC, e.created ASC
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        into_events(events)
    }

    async fn delete_by_plant(&self, plant_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM watering_events AS e
            WHERE e.plant_uid = $1
            "#,
        )
        .bind(*plant_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
