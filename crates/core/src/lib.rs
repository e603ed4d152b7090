mod error;
pub mod plant;
pub mod reconciliation;
mod shared;
pub mod watering_event;

pub use error::SchedulerError;
pub use shared::side_effect::SideEffect;
pub use shared::usecase::{execute, UseCase};
