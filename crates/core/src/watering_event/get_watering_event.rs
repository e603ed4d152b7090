use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::{WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;

#[derive(Debug)]
pub struct GetWateringEventUseCase {
    pub event_id: ID,
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden(ID),
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The watering event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::Forbidden(event_id) => Self::Forbidden(format!(
                "Not allowed to access the watering event with id: {}.",
                event_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWateringEventUseCase {
    type Response = WateringEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "GetWateringEvent";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .watering_events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        match ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &event.plant_id)
            .await
        {
            Some(_) => Ok(event),
            None => Err(UseCaseError::Forbidden(self.event_id.clone())),
        }
    }
}
