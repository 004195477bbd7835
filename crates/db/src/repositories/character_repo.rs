//! Repository for the `characters` table.

use async_trait::async_trait;
use sqlx::PgPool;
use warhammer_core::types::DbId;

use crate::error::StoreError;
use crate::models::character::{Character, CreateCharacter, UpdateCharacter};
use crate::repositories::CharacterRepository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, rank, faction_id, created_at, updated_at";

/// PostgreSQL-backed [`CharacterRepository`].
#[derive(Clone)]
pub struct PgCharacterRepo {
    pool: PgPool,
}

impl PgCharacterRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// List the characters of the given factions, ordered by id.
pub(crate) async fn list_by_faction_ids(
    pool: &PgPool,
    faction_ids: &[DbId],
) -> Result<Vec<Character>, sqlx::Error> {
    if faction_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!(
        "SELECT {COLUMNS} FROM characters
         WHERE faction_id = ANY($1)
         ORDER BY id ASC"
    );
    sqlx::query_as::<_, Character>(&query)
        .bind(faction_ids)
        .fetch_all(pool)
        .await
}

#[async_trait]
impl CharacterRepository for PgCharacterRepo {
    async fn list(&self) -> Result<Vec<Character>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id ASC");
        let characters = sqlx::query_as::<_, Character>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(characters)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(character)
    }

    async fn create(&self, input: &CreateCharacter) -> Result<Character, StoreError> {
        let query = format!(
            "INSERT INTO characters (name, description, rank, faction_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.rank)
            .bind(input.faction_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(character)
    }

    async fn update(&self, id: DbId, input: &UpdateCharacter) -> Result<Character, StoreError> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                rank = COALESCE($4, rank),
                faction_id = COALESCE($5, faction_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.rank)
            .bind(input.faction_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Character",
                id,
            })
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "Deleted character");
        Ok(())
    }
}
