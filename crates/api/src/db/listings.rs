//! Listing repository for database operations.
//!
//! The database file is created at startup, so queries use the runtime
//! `query_as` API rather than compile-time checked macros.

use sqlx::SqlitePool;

use brewfinder_core::{ListingId, ListingName};

use super::RepositoryError;
use crate::models::listing::{Listing, NewListing};

/// Raw `listing` table row.
#[derive(sqlx::FromRow)]
struct ListingRow {
    id: ListingId,
    name: String,
    map_url: String,
    img_url: String,
    location: String,
    seats: String,
    has_sockets: bool,
    has_toilet: bool,
    has_wifi: bool,
    can_take_calls: bool,
    coffee_price: Option<String>,
}

impl ListingRow {
    /// Convert a row into the validated domain type.
    ///
    /// The name constraint is re-checked on the way out; a row that no
    /// longer parses means the database was edited out-of-band.
    fn into_listing(self) -> Result<Listing, RepositoryError> {
        let name = ListingName::parse(&self.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid name in database: {e}"))
        })?;

        Ok(Listing {
            id: self.id,
            name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_sockets: self.has_sockets,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        })
    }
}

/// Repository for listing database operations.
pub struct ListingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListingRepository<'a> {
    /// Create a new listing repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all listings in the store's natural iteration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored name is invalid.
    pub async fn list_all(&self) -> Result<Vec<Listing>, RepositoryError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r"
            SELECT id, name, map_url, img_url, location, seats,
                   has_sockets, has_toilet, has_wifi, can_take_calls, coffee_price
            FROM listing
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ListingRow::into_listing).collect()
    }

    /// Get all listings whose location matches exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored name is invalid.
    pub async fn find_by_location(&self, location: &str) -> Result<Vec<Listing>, RepositoryError> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r"
            SELECT id, name, map_url, img_url, location, seats,
                   has_sockets, has_toilet, has_wifi, can_take_calls, coffee_price
            FROM listing
            WHERE location = ?1
            ",
        )
        .bind(location)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ListingRow::into_listing).collect()
    }

    /// Get a listing by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored name is invalid.
    pub async fn get(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r"
            SELECT id, name, map_url, img_url, location, seats,
                   has_sockets, has_toilet, has_wifi, can_take_calls, coffee_price
            FROM listing
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ListingRow::into_listing).transpose()
    }

    /// Create a new listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewListing) -> Result<Listing, RepositoryError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r"
            INSERT INTO listing
                (name, map_url, img_url, location, seats,
                 has_sockets, has_toilet, has_wifi, can_take_calls, coffee_price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            RETURNING id, name, map_url, img_url, location, seats,
                      has_sockets, has_toilet, has_wifi, can_take_calls, coffee_price
            ",
        )
        .bind(new.name.as_str())
        .bind(&new.map_url)
        .bind(&new.img_url)
        .bind(&new.location)
        .bind(&new.seats)
        .bind(new.has_sockets)
        .bind(new.has_toilet)
        .bind(new.has_wifi)
        .bind(new.can_take_calls)
        .bind(new.coffee_price.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_listing()
    }

    /// Overwrite the coffee price of a listing. Passing `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the listing doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_price(
        &self,
        id: ListingId,
        new_price: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE listing
            SET coffee_price = ?1
            WHERE id = ?2
            ",
        )
        .bind(new_price)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a listing by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the listing doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ListingId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM listing
            WHERE id = ?1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        pool
    }

    fn sample(name: &str, location: &str) -> NewListing {
        NewListing {
            name: ListingName::parse(name).unwrap(),
            map_url: "https://maps.example/cafe".to_owned(),
            img_url: "https://img.example/cafe.jpg".to_owned(),
            location: location.to_owned(),
            seats: "20-30".to_owned(),
            has_sockets: true,
            has_toilet: false,
            has_wifi: true,
            can_take_calls: false,
            coffee_price: Some("2.80".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips_every_field() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let created = repo.create(&sample("Roasted", "Berlin")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        let got = &all[0];
        assert_eq!(got.id, created.id);
        assert_eq!(got.name.as_str(), "Roasted");
        assert_eq!(got.map_url, "https://maps.example/cafe");
        assert_eq!(got.img_url, "https://img.example/cafe.jpg");
        assert_eq!(got.location, "Berlin");
        assert_eq!(got.seats, "20-30");
        assert!(got.has_sockets);
        assert!(!got.has_toilet);
        assert!(got.has_wifi);
        assert!(!got.can_take_calls);
        assert_eq!(got.coffee_price.as_deref(), Some("2.80"));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_conflict_and_adds_nothing() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        repo.create(&sample("Roasted", "Berlin")).await.unwrap();
        let err = repo.create(&sample("Roasted", "Hamburg")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_location_is_exact_and_case_sensitive() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        repo.create(&sample("Roasted", "Berlin")).await.unwrap();
        repo.create(&sample("Slow Drip", "berlin")).await.unwrap();

        let hits = repo.find_by_location("Berlin").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name.as_str(), "Roasted");

        assert!(repo.find_by_location("Paris").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_price_changes_only_the_price() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let created = repo.create(&sample("Roasted", "Berlin")).await.unwrap();
        repo.update_price(created.id, Some("3.40")).await.unwrap();

        let got = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(got.coffee_price.as_deref(), Some("3.40"));
        assert_eq!(got.name.as_str(), created.name.as_str());
        assert_eq!(got.location, created.location);
        assert_eq!(got.seats, created.seats);
        assert_eq!(got.has_wifi, created.has_wifi);
    }

    #[tokio::test]
    async fn test_update_price_with_none_clears_it() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let created = repo.create(&sample("Roasted", "Berlin")).await.unwrap();
        repo.update_price(created.id, None).await.unwrap();

        let got = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(got.coffee_price, None);
    }

    #[tokio::test]
    async fn test_update_price_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let err = repo
            .update_price(ListingId::new(999), Some("3.40"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_removes_the_record() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let created = repo.create(&sample("Roasted", "Berlin")).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.get(created.id).await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let pool = test_pool().await;
        let repo = ListingRepository::new(&pool);

        let err = repo.delete(ListingId::new(999)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
