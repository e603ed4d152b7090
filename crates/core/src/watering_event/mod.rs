mod create_initial_watering_event;
mod create_watering_event;
mod get_overdue_watering_events;
mod get_watering_event;
mod get_watering_events_in_range;
mod import_watering_event;
mod recalculate_watering_events;
mod resolve_watering_event;

pub use create_initial_watering_event::CreateInitialWateringEventUseCase;
pub use create_watering_event::CreateWateringEventUseCase;
pub use get_overdue_watering_events::GetOverdueWateringEventsUseCase;
pub use get_watering_event::GetWateringEventUseCase;
pub use get_watering_events_in_range::GetWateringEventsInRangeUseCase;
pub use import_watering_event::ImportWateringEventUseCase;
pub use recalculate_watering_events::{RecalculateWateringEventsUseCase, RecalculatedSchedule};
pub use resolve_watering_event::{ResolveWateringEventUseCase, ResolvedWateringEvent};

use plant_scheduler_domain::{Plant, WaterNeed};
use plant_scheduler_infra::SchedulerContext;

/// The water need a plant inherits from its species, if it has a species
/// that can still be found
async fn find_water_need(plant: &Plant, ctx: &SchedulerContext) -> Option<WaterNeed> {
    let species_id = plant.species_id.as_ref()?;
    ctx.repos
        .species
        .find(species_id)
        .await
        .map(|species| species.water_preference)
}
