use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{parse_date, WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;

/// Events of any status for the user's plants, scheduled within the
/// inclusive range. Used to render a calendar. A reversed range matches
/// nothing.
#[derive(Debug)]
pub struct GetWateringEventsInRangeUseCase {
    pub user_id: ID,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GetWateringEventsInRangeUseCase {
    pub fn parse(user_id: ID, start: &str, end: &str) -> Result<Self, SchedulerError> {
        Ok(Self {
            user_id,
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::Internal("Unable to query watering events".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWateringEventsInRangeUseCase {
    type Response = Vec<WateringEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetWateringEventsInRange";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        if self.end < self.start {
            return Ok(Vec::new());
        }

        ctx.repos
            .watering_events
            .find_in_range(&self.user_id, self.start, self.end)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
