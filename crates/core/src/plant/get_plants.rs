use crate::error::SchedulerError;
use crate::shared::usecase::UseCase;
use plant_scheduler_domain::{Plant, ID};
use plant_scheduler_infra::SchedulerContext;

#[derive(Debug)]
pub struct GetPlantsUseCase {
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::Internal("Unable to query plants".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPlantsUseCase {
    type Response = Vec<Plant>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPlants";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .plants
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
