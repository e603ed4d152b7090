use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A houseplant owned by a single user. Its watering needs come
/// from the species it is classified as, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub location: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub species_id: Option<ID>,
    pub created: i64,
    pub updated: i64,
}

impl Plant {
    pub fn new(user_id: ID, name: String, timestamp: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            location: None,
            acquisition_date: None,
            notes: None,
            photos: Vec::new(),
            species_id: None,
            created: timestamp,
            updated: timestamp,
        }
    }
}

impl Entity for Plant {
    fn id(&self) -> &ID {
        &self.id
    }
}
