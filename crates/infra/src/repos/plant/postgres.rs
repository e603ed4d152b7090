use super::IPlantRepo;
use chrono::NaiveDate;
use plant_scheduler_domain::{Plant, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresPlantRepo {
    pool: PgPool,
}

impl PostgresPlantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlantRaw {
    plant_uid: Uuid,
    user_uid: Uuid,
    name: String,
    location: Option<String>,
    acquisition_date: Option<NaiveDate>,
    notes: Option<String>,
    photos: Vec<String>,
    species_uid: Option<Uuid>,
    created: i64,
    updated: i64,
}

impl From<PlantRaw> for Plant {
    fn from(e: PlantRaw) -> Self {
        Self {
            id: e.plant_uid.into(),
            user_id: e.user_uid.into(),
            name: e.name,
            location: e.location,
            acquisition_date: e.acquisition_date,
            notes: e.notes,
            photos: e.photos,
            species_id: e.species_uid.map(|id| id.into()),
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IPlantRepo for PostgresPlantRepo {
    async fn insert(&self, plant: &Plant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plants(
                plant_uid,
                user_uid,
                name,
                location,
                acquisition_date,
                notes,
                photos,
                species_uid,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*plant.id.inner_ref())
        .bind(*plant.user_id.inner_ref())
        .bind(&plant.name)
        .bind(&plant.location)
        .bind(plant.acquisition_date)
        .bind(&plant.notes)
        .bind(plant.photos.clone())
        .bind(plant.species_id.as_ref().map(|id| *id.inner_ref()))
        .bind(plant.created)
        .bind(plant.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert plant: {:?}. DB returned error: {:?}",
                plant, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, plant: &Plant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE plants SET
                name = $2,
                location = $3,
                acquisition_date = $4,
                notes = $5,
                photos = $6,
                species_uid = $7,
                updated = $8
            WHERE plant_uid = $1
            "#,
        )
        .bind(*plant.id.inner_ref())
        .bind(&plant.name)
        .bind(&plant.location)
        .bind(plant.acquisition_date)
        .bind(&plant.notes)
        .bind(plant.photos.clone())
        .bind(plant.species_id.as_ref().map(|id| *id.inner_ref()))
        .bind(plant.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save plant: {:?}. DB returned error: {:?}",
                plant, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, plant_id: &ID) -> Option<Plant> {
        let res: Option<PlantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM plants AS p
            WHERE p.plant_uid = $1
            "#,
        )
        .bind(*plant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find plant with id: {} failed. DB returned error: {:?}", plant_id, e);
            None
        });
        res.map(|plant| plant.into())
    }

    async fn find_by_user_and_id(&self, user_id: &ID, plant_id: &ID) -> Option<Plant> {
        let res: Option<PlantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM plants AS p
            WHERE p.plant_uid = $1 AND p.user_uid = $2
            "#,
        )
        .bind(*plant_id.inner_ref())
        .bind(*user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find plant with id: {} for user: {} failed. DB returned error: {:?}",
                plant_id, user_id, e
            );
            None
        });
        res.map(|plant| plant.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Plant>> {
        let plants: Vec<PlantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM plants AS p
            WHERE p.user_uid = $1
            ORDER BY p.created DESC
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(plants.into_iter().map(|p| p.into()).collect())
    }

    async fn delete(&self, plant_id: &ID) -> Option<Plant> {
        let res: Option<PlantRaw> = sqlx::query_as(
            r#"
            DELETE FROM plants AS p
            WHERE p.plant_uid = $1
            RETURNING *
            "#,
        )
        .bind(*plant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Delete plant with id: {} failed. DB returned error: {:?}", plant_id, e);
            None
        });
        res.map(|plant| plant.into())
    }
}
