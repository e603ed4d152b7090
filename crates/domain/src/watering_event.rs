use crate::{
    shared::entity::{Entity, ID},
    water_need::{postpone_interval, watering_interval, WaterNeed},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WateringEventStatus {
    Pending,
    Watered,
    Postponed,
}

impl WateringEventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Watered => "WATERED",
            Self::Postponed => "POSTPONED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Watering event status: {0} is not one of PENDING, WATERED or POSTPONED")]
pub struct InvalidWateringEventStatusError(pub String);

impl FromStr for WateringEventStatus {
    type Err = InvalidWateringEventStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "WATERED" => Ok(Self::Watered),
            "POSTPONED" => Ok(Self::Postponed),
            _ => Err(InvalidWateringEventStatusError(s.to_string())),
        }
    }
}

/// The ways a user can resolve a pending `WateringEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WateringAction {
    Watered,
    Postponed,
}

impl WateringAction {
    pub fn resolved_status(&self) -> WateringEventStatus {
        match self {
            Self::Watered => WateringEventStatus::Watered,
            Self::Postponed => WateringEventStatus::Postponed,
        }
    }

    /// Days until the successor event is due
    pub fn interval(&self, need: WaterNeed) -> i64 {
        match self {
            Self::Watered => watering_interval(need),
            Self::Postponed => postpone_interval(need),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Watering action: {0} is not one of WATERED or POSTPONED")]
pub struct InvalidWateringActionError(pub String);

impl FromStr for WateringAction {
    type Err = InvalidWateringActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WATERED" => Ok(Self::Watered),
            "POSTPONED" => Ok(Self::Postponed),
            _ => Err(InvalidWateringActionError(s.to_string())),
        }
    }
}

/// A single due date for watering a `Plant`.
///
/// An event is born `Pending` and is resolved exactly once, either as
/// `Watered` or `Postponed`. Resolved events are history and are never
/// reopened; the schedule moves forward by creating a new pending event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringEvent {
    pub id: ID,
    pub plant_id: ID,
    pub scheduled_date: NaiveDate,
    pub status: WateringEventStatus,
    pub completed_date: Option<NaiveDate>,
    pub created: i64,
    pub updated: i64,
}

impl WateringEvent {
    pub fn new_pending(plant_id: ID, scheduled_date: NaiveDate, timestamp: i64) -> Self {
        Self {
            id: Default::default(),
            plant_id,
            scheduled_date,
            status: WateringEventStatus::Pending,
            completed_date: None,
            created: timestamp,
            updated: timestamp,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == WateringEventStatus::Pending
    }

    /// Applies the single allowed transition out of `Pending`.
    /// Returns false and leaves the event untouched if it was already resolved.
    pub fn resolve(
        &mut self,
        action: WateringAction,
        completed_date: NaiveDate,
        timestamp: i64,
    ) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = action.resolved_status();
        self.completed_date = Some(completed_date);
        self.updated = timestamp;
        true
    }

    /// Inclusive on both ends
    pub fn is_scheduled_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.scheduled_date && self.scheduled_date <= end
    }

    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_pending() && self.scheduled_date < as_of
    }
}

impl Entity for WateringEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Calendar date of the next watering when counting from `from`.
/// Only whole days are added, time of day never matters.
pub fn next_scheduled_date(from: NaiveDate, need: WaterNeed, action: WateringAction) -> NaiveDate {
    from + Duration::days(action.interval(need))
}
