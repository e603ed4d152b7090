use plant_scheduler_domain::{InvalidDateError, InvalidWateringActionError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchedulerError {
    #[error("Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Forbidden. Error message: `{0}`")]
    Forbidden(String),
    #[error("Invalid state. Error message: `{0}`")]
    InvalidState(String),
    #[error("Unable to schedule without a species. Error message: `{0}`")]
    MissingSpecies(String),
    #[error("Invalid data provided. Error message: `{0}`")]
    Validation(String),
    #[error("Internal error. Error message: `{0}`")]
    Internal(String),
}

impl From<InvalidDateError> for SchedulerError {
    fn from(e: InvalidDateError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<InvalidWateringActionError> for SchedulerError {
    fn from(e: InvalidWateringActionError) -> Self {
        Self::Validation(e.to_string())
    }
}
