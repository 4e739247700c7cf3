use async_trait::async_trait;
use listings_shared::{NewListing, StoredRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::{rent_column, ListingRepository, StorageError};
use crate::config::DatabaseConfig;
use crate::metrics;

/// Postgres-backed listing store.
///
/// Rows are returned through `to_jsonb` so column types reach the output
/// schema unchanged.
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool using `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.connection_string)
            .await?;

        info!(max_connections = config.max_connections, "Database connected");
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn create(&self, listing: &NewListing) -> Result<StoredRecord, StorageError> {
        let rent = rent_column(listing.rent)?;
        let start = std::time::Instant::now();

        let record = sqlx::query_scalar::<_, StoredRecord>(
            r#"
            INSERT INTO listings (title, description, rent, address, rooms, contact)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING to_jsonb(listings)
            "#,
        )
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(rent)
        .bind(&listing.address)
        .bind(listing.rooms)
        .bind(&listing.contact)
        .fetch_one(&self.pool)
        .await?;

        metrics::observe_db_query("insert_listing", start.elapsed().as_secs_f64());
        debug!(id = ?record.get("id"), "Inserted listing row");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StorageError> {
        let start = std::time::Instant::now();

        let records = sqlx::query_scalar::<_, StoredRecord>(
            "SELECT to_jsonb(l) FROM listings l ORDER BY l.created_at, l.id",
        )
        .fetch_all(&self.pool)
        .await?;

        metrics::observe_db_query("select_listings", start.elapsed().as_secs_f64());
        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<StoredRecord>, StorageError> {
        let start = std::time::Instant::now();

        let record = sqlx::query_scalar::<_, StoredRecord>(
            "DELETE FROM listings WHERE id = $1 RETURNING to_jsonb(listings)",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        metrics::observe_db_query("delete_listing", start.elapsed().as_secs_f64());
        Ok(record)
    }
}
