//! Repository for the `races` table.

use async_trait::async_trait;
use sqlx::PgPool;
use warhammer_core::types::DbId;

use crate::error::StoreError;
use crate::models::race::{CreateRace, Race, RaceDetail, UpdateRace};
use crate::repositories::nesting::{ids, nest_factions};
use crate::repositories::{faction_repo, RaceRepository};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// PostgreSQL-backed [`RaceRepository`].
#[derive(Clone)]
pub struct PgRaceRepo {
    pool: PgPool,
}

impl PgRaceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach factions and their characters to `races`.
    ///
    /// Issues one query per level regardless of how many races are passed.
    async fn expand(&self, races: Vec<Race>) -> Result<Vec<RaceDetail>, sqlx::Error> {
        if races.is_empty() {
            return Ok(Vec::new());
        }
        let race_ids = ids(&races, |r| r.id);
        let factions = faction_repo::list_by_race_ids(&self.pool, &race_ids).await?;
        let factions = faction_repo::with_characters(&self.pool, factions).await?;
        Ok(nest_factions(races, factions))
    }
}

#[async_trait]
impl RaceRepository for PgRaceRepo {
    async fn list(&self) -> Result<Vec<RaceDetail>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM races ORDER BY id ASC");
        let races = sqlx::query_as::<_, Race>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(self.expand(races).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<RaceDetail>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM races WHERE id = $1");
        let race = sqlx::query_as::<_, Race>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match race {
            Some(race) => Ok(self.expand(vec![race]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, input: &CreateRace) -> Result<Race, StoreError> {
        let query = format!(
            "INSERT INTO races (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let race = sqlx::query_as::<_, Race>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(race)
    }

    async fn update(&self, id: DbId, input: &UpdateRace) -> Result<Race, StoreError> {
        let query = format!(
            "UPDATE races SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Race>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: "Race", id })
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM races WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "Deleted race");
        Ok(())
    }
}
