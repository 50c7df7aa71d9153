use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Executor, Pool, Postgres};
use uuid::Uuid;

use super::PlaceStore;

use crate::entities::Place;
use crate::error::{not_found_error, Error};

pub struct PgPlaceStore {
    pool: Pool<Postgres>,
}

impl PgPlaceStore {
    #[tracing::instrument(name = "PgPlaceStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: Pool<Postgres>) -> Result<Self, Error> {
        pool.execute(
            "CREATE TABLE IF NOT EXISTS places (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL,
                name VARCHAR NOT NULL,
                description VARCHAR NOT NULL,
                address VARCHAR NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                CONSTRAINT places_owner_name_address_key UNIQUE (owner_id, name, address)
            )",
        )
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PlaceStore for PgPlaceStore {
    #[tracing::instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Place>, Error> {
        let places = sqlx::query_as::<_, Place>("SELECT * FROM places ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: Uuid) -> Result<Option<Place>, Error> {
        let place = sqlx::query_as::<_, Place>("SELECT * FROM places WHERE id = $1")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_identity(
        &self,
        owner_id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<Option<Place>, Error> {
        let place = sqlx::query_as::<_, Place>(
            "SELECT * FROM places WHERE owner_id = $1 AND name = $2 AND address = $3",
        )
        .bind(&owner_id)
        .bind(name)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn insert(&self, place: &Place) -> Result<(), Error> {
        self.pool
            .execute(
                sqlx::query(
                    "INSERT INTO places (id, owner_id, name, description, address, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(&place.id)
                .bind(&place.owner_id)
                .bind(&place.name)
                .bind(&place.description)
                .bind(&place.address)
                .bind(&place.created_at)
                .bind(&place.updated_at),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, place: &Place) -> Result<(), Error> {
        let result = self
            .pool
            .execute(
                sqlx::query(
                    "UPDATE places SET name = $2, description = $3, address = $4, updated_at = $5 WHERE id = $1",
                )
                .bind(&place.id)
                .bind(&place.name)
                .bind(&place.description)
                .bind(&place.address)
                .bind(&place.updated_at),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.pool
            .execute(sqlx::query("DELETE FROM places WHERE id = $1").bind(&id))
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
