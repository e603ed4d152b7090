mod create_plant;
mod delete_plant;
mod get_plants;
mod update_plant;

pub use create_plant::{CreatePlantUseCase, CreatedPlant};
pub use delete_plant::{DeletePlantUseCase, DeletedPlant};
pub use get_plants::GetPlantsUseCase;
pub use update_plant::{SpeciesAssignment, UpdatePlantUseCase, UpdatedPlant};
