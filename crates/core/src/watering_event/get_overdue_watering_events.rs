use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;

/// Pending events for the user's plants that were due before `as_of`
#[derive(Debug)]
pub struct GetOverdueWateringEventsUseCase {
    pub user_id: ID,
    /// Defaults to today
    pub as_of: Option<NaiveDate>,
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
impl UseCase for GetOverdueWateringEventsUseCase {
    type Response = Vec<WateringEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetOverdueWateringEvents";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let as_of = self.as_of.unwrap_or_else(|| ctx.sys.today());
        ctx.repos
            .watering_events
            .find_overdue(&self.user_id, as_of)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
