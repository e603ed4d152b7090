use crate::{
    shared::entity::{Entity, ID},
    water_need::WaterNeed,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSpecies {
    pub id: ID,
    pub common_name: String,
    pub latin_name: String,
    pub water_preference: WaterNeed,
}

impl PlantSpecies {
    pub fn new(common_name: &str, latin_name: &str, water_preference: WaterNeed) -> Self {
        Self {
            id: Default::default(),
            common_name: common_name.into(),
            latin_name: latin_name.into(),
            water_preference,
        }
    }
}

impl Entity for PlantSpecies {
    fn id(&self) -> &ID {
        &self.id
    }
}
