//! Repository for the `factions` table.

use async_trait::async_trait;
use sqlx::PgPool;
use warhammer_core::types::DbId;

use crate::error::StoreError;
use crate::models::faction::{CreateFaction, Faction, FactionDetail, UpdateFaction};
use crate::repositories::nesting::{ids, nest_characters};
use crate::repositories::{character_repo, FactionRepository};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, race_id, created_at, updated_at";

/// PostgreSQL-backed [`FactionRepository`].
#[derive(Clone)]
pub struct PgFactionRepo {
    pool: PgPool,
}

impl PgFactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// List the factions of the given races, ordered by id.
pub(crate) async fn list_by_race_ids(
    pool: &PgPool,
    race_ids: &[DbId],
) -> Result<Vec<Faction>, sqlx::Error> {
    if race_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!(
        "SELECT {COLUMNS} FROM factions
         WHERE race_id = ANY($1)
         ORDER BY id ASC"
    );
    sqlx::query_as::<_, Faction>(&query)
        .bind(race_ids)
        .fetch_all(pool)
        .await
}

/// Load the characters of `factions` in one query and attach them.
pub(crate) async fn with_characters(
    pool: &PgPool,
    factions: Vec<Faction>,
) -> Result<Vec<FactionDetail>, sqlx::Error> {
    let faction_ids = ids(&factions, |f| f.id);
    let characters = character_repo::list_by_faction_ids(pool, &faction_ids).await?;
    Ok(nest_characters(factions, characters))
}

#[async_trait]
impl FactionRepository for PgFactionRepo {
    async fn list(&self) -> Result<Vec<FactionDetail>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM factions ORDER BY id ASC");
        let factions = sqlx::query_as::<_, Faction>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(with_characters(&self.pool, factions).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<FactionDetail>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM factions WHERE id = $1");
        let faction = sqlx::query_as::<_, Faction>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match faction {
            Some(faction) => {
                let mut nested = with_characters(&self.pool, vec![faction]).await?;
                Ok(nested.pop())
            }
            None => Ok(None),
        }
    }

    async fn create(&self, input: &CreateFaction) -> Result<Faction, StoreError> {
        let query = format!(
            "INSERT INTO factions (name, description, race_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let faction = sqlx::query_as::<_, Faction>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.race_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(faction)
    }

    async fn update(&self, id: DbId, input: &UpdateFaction) -> Result<Faction, StoreError> {
        let query = format!(
            "UPDATE factions SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                race_id = COALESCE($4, race_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Faction>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.race_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Faction",
                id,
            })
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM factions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "Deleted faction");
        Ok(())
    }
}
