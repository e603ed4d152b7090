use crate::error::SchedulerError;
use crate::shared::{
    side_effect::SideEffect,
    usecase::{execute, UseCase},
};
use crate::watering_event::CreateInitialWateringEventUseCase;
use chrono::NaiveDate;
use plant_scheduler_domain::{Plant, WateringEvent, ID};
use plant_scheduler_infra::SchedulerContext;
use tracing::warn;

#[derive(Debug)]
pub struct CreatePlantUseCase {
    pub user_id: ID,
    pub name: String,
    pub location: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photos: Vec<String>,
    pub species_id: Option<ID>,
    /// Imported plants bring their own watering history
    pub schedule_initial_event: bool,
}

impl CreatePlantUseCase {
    pub fn new(user_id: ID, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            location: None,
            acquisition_date: None,
            notes: None,
            photos: Vec::new(),
            species_id: None,
            schedule_initial_event: true,
        }
    }
}

#[derive(Debug)]
pub struct CreatedPlant {
    pub plant: Plant,
    pub initial_event: SideEffect<WateringEvent>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyName,
    SpeciesNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => Self::Validation("A plant must have a name".into()),
            UseCaseError::SpeciesNotFound(species_id) => Self::NotFound(format!(
                "The species with id: {}, was not found.",
                species_id
            )),
            UseCaseError::StorageError => Self::Internal("Unable to store plant".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreatePlantUseCase {
    type Response = CreatedPlant;

    type Error = UseCaseError;

    const NAME: &'static str = "CreatePlant";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UseCaseError::EmptyName);
        }

        let species = match &self.species_id {
            Some(species_id) => Some(
                ctx.repos
                    .species
                    .find(species_id)
                    .await
                    .ok_or_else(|| UseCaseError::SpeciesNotFound(species_id.clone()))?,
            ),
            None => None,
        };

        let mut plant = Plant::new(
            self.user_id.clone(),
            name.to_string(),
            ctx.sys.get_timestamp_millis(),
        );
        plant.location = self.location.clone();
        plant.acquisition_date = self.acquisition_date;
        plant.notes = self.notes.clone();
        plant.photos = self.photos.clone();
        plant.species_id = self.species_id.clone();

        ctx.repos
            .plants
            .insert(&plant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let initial_event = match species {
            Some(species) if self.schedule_initial_event => {
                let usecase = CreateInitialWateringEventUseCase {
                    plant: plant.clone(),
                    species: Some(species),
                };
                match execute(usecase, ctx).await {
                    Ok(event) => SideEffect::Applied(event),
                    Err(e) => {
                        warn!(
                            "Plant: {} was created without a watering schedule. Error: {:?}",
                            plant.id, e
                        );
                        SideEffect::Failed(SchedulerError::from(e).to_string())
                    }
                }
            }
            _ => SideEffect::NotApplicable,
        };

        Ok(CreatedPlant {
            plant,
            initial_event,
        })
    }
}
