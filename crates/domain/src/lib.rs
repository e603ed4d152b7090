mod date;
mod plant;
mod shared;
mod species;
mod water_need;
mod watering_event;

pub use date::{format_date, parse_date, InvalidDateError};
pub use plant::Plant;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use species::PlantSpecies;
pub use water_need::{postpone_interval, watering_interval, InvalidWaterNeedError, WaterNeed};
pub use watering_event::{
    next_scheduled_date, InvalidWateringActionError, InvalidWateringEventStatusError,
    WateringAction, WateringEvent, WateringEventStatus,
};
