use crate::error::SchedulerError;
use crate::shared::{
    side_effect::SideEffect,
    usecase::{execute, UseCase},
};
use crate::watering_event::{RecalculateWateringEventsUseCase, RecalculatedSchedule};
use chrono::NaiveDate;
use plant_scheduler_domain::{Plant, ID};
use plant_scheduler_infra::SchedulerContext;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum SpeciesAssignment {
    Unchanged,
    Assign(ID),
    Remove,
}

impl Default for SpeciesAssignment {
    fn default() -> Self {
        Self::Unchanged
    }
}

/// Updates the given attributes of a plant. When the species assignment
/// changes the watering schedule is rebuilt.
#[derive(Debug, Default)]
pub struct UpdatePlantUseCase {
    pub user_id: ID,
    pub plant_id: ID,
    pub name: Option<String>,
    pub location: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
    pub species: SpeciesAssignment,
}

#[derive(Debug)]
pub struct UpdatedPlant {
    pub plant: Plant,
    pub recalculation: SideEffect<RecalculatedSchedule>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EmptyName,
    SpeciesNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for SchedulerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(plant_id) => Self::NotFound(format!(
                "The plant with id: {}, was not found.",
                plant_id
            )),
            UseCaseError::EmptyName => Self::Validation("A plant must have a name".into()),
            UseCaseError::SpeciesNotFound(species_id) => Self::NotFound(format!(
                "The species with id: {}, was not found.",
                species_id
            )),
            UseCaseError::StorageError => Self::Internal("Unable to update plant".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePlantUseCase {
    type Response = UpdatedPlant;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePlant";

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Error> {
        let mut plant = ctx
            .repos
            .plants
            .find_by_user_and_id(&self.user_id, &self.plant_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.plant_id.clone()))?;

        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(UseCaseError::EmptyName);
            }
            plant.name = name.to_string();
        }
        if let Some(location) = &self.location {
            plant.location = Some(location.clone());
        }
        if let Some(acquisition_date) = self.acquisition_date {
            plant.acquisition_date = Some(acquisition_date);
        }
        if let Some(notes) = &self.notes {
            plant.notes = Some(notes.clone());
        }
        if let Some(photos) = &self.photos {
            plant.photos = photos.clone();
        }

        let new_species_id = match &self.species {
            SpeciesAssignment::Unchanged => plant.species_id.clone(),
            SpeciesAssignment::Remove => None,
            SpeciesAssignment::Assign(species_id) => {
                if ctx.repos.species.find(species_id).await.is_none() {
                    return Err(UseCaseError::SpeciesNotFound(species_id.clone()));
                }
                Some(species_id.clone())
            }
        };
        let species_changed = new_species_id != plant.species_id;
        plant.species_id = new_species_id;
        plant.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .plants
            .save(&plant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let recalculation = if species_changed {
            let usecase = RecalculateWateringEventsUseCase {
                plant_id: plant.id.clone(),
            };
            match execute(usecase, ctx).await {
                Ok(schedule) => SideEffect::Applied(schedule),
                Err(e) => {
                    warn!(
                        "Species of plant: {} changed but the schedule was not rebuilt. Error: {:?}",
                        plant.id, e
                    );
                    SideEffect::Failed(SchedulerError::from(e).to_string())
                }
            }
        } else {
            SideEffect::NotApplicable
        };

        Ok(UpdatedPlant {
            plant,
            recalculation,
        })
    }
}
