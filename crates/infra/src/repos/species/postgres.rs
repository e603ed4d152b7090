use super::IPlantSpeciesRepo;
use plant_scheduler_domain::{PlantSpecies, WaterNeed, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresPlantSpeciesRepo {
    pool: PgPool,
}

impl PostgresPlantSpeciesRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlantSpeciesRaw {
    species_uid: Uuid,
    common_name: String,
    latin_name: String,
    water_preference: String,
}

impl TryFrom<PlantSpeciesRaw> for PlantSpecies {
    type Error = anyhow::Error;

    fn try_from(e: PlantSpeciesRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.species_uid.into(),
            common_name: e.common_name,
            latin_name: e.latin_name,
            water_preference: e.water_preference.parse::<WaterNeed>()?,
        })
    }
}

#[async_trait::async_trait]
impl IPlantSpeciesRepo for PostgresPlantSpeciesRepo {
    async fn insert(&self, species: &PlantSpecies) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plant_species(species_uid, common_name, latin_name, water_preference)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(*species.id.inner_ref())
        .bind(&species.common_name)
        .bind(&species.latin_name)
        .bind(species.water_preference.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert species: {:?}. DB returned error: {:?}",
                species, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, species_id: &ID) -> Option<PlantSpecies> {
        let res: Option<PlantSpeciesRaw> = sqlx::query_as(
            r#"
            SELECT * FROM plant_species AS s
            WHERE s.species_uid = $1
            "#,
        )
        .bind(*species_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find species with id: {} failed. DB returned error: {:?}",
                species_id, e
            );
            None
        });
        match res.map(PlantSpecies::try_from) {
            Some(Ok(species)) => Some(species),
            Some(Err(e)) => {
                error!("Stored species: {} is malformed. Error: {:?}", species_id, e);
                None
            }
            None => None,
        }
    }
}
