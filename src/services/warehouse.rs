use crate::models::{ListingFilters, ListingRecord};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the listings warehouse
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Read-only access to the listings table
pub struct ListingsWarehouse {
    pool: PgPool,
    table: String,
    default_limit: i64,
    max_limit: i64,
}

impl ListingsWarehouse {
    /// Create a warehouse client
    ///
    /// The pool connects lazily so the gateway can start while the
    /// database is still unreachable.
    pub fn new(
        database_url: &str,
        max_connections: u32,
        table: String,
        default_limit: i64,
        max_limit: i64,
    ) -> Result<Self, WarehouseError> {
        if !is_identifier(&table) {
            return Err(WarehouseError::InvalidInput(format!("Invalid table name: {}", table)));
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect_lazy(database_url)?;

        Ok(Self {
            pool,
            table,
            default_limit,
            max_limit: max_limit.max(1),
        })
    }

    /// Listings matching the filters, cheapest first
    pub async fn query(&self, filters: &ListingFilters) -> Result<Vec<ListingRecord>, WarehouseError> {
        check_ranges(filters)?;

        let limit = filters
            .limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit);

        let mut builder = build_listing_query(&self.table, filters, limit);
        let rows = builder.build().fetch_all(&self.pool).await?;

        let listings = rows
            .iter()
            .map(project_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Warehouse returned {} listings (limit {})", listings.len(), limit);

        Ok(listings)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, WarehouseError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Build the parameterized listings query; every filter value is bound
pub fn build_listing_query(
    table: &str,
    filters: &ListingFilters,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT id::text AS id, title, city, price::float8 AS price, area::float8 AS area, \
         rooms::int4 AS rooms, url FROM {} WHERE TRUE",
        table
    ));

    if let Some(city) = &filters.city {
        builder.push(" AND city ILIKE ").push_bind(city.clone());
    }
    if let Some(min_price) = filters.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(min_area) = filters.min_area {
        builder.push(" AND area >= ").push_bind(min_area);
    }
    if let Some(max_area) = filters.max_area {
        builder.push(" AND area <= ").push_bind(max_area);
    }
    if let Some(rooms) = filters.rooms {
        builder.push(" AND rooms = ").push_bind(rooms);
    }

    builder.push(" ORDER BY price ASC LIMIT ").push_bind(limit);
    builder
}

fn check_ranges(filters: &ListingFilters) -> Result<(), WarehouseError> {
    if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
        if min > max {
            return Err(WarehouseError::InvalidInput("minPrice is greater than maxPrice".into()));
        }
    }
    if let (Some(min), Some(max)) = (filters.min_area, filters.max_area) {
        if min > max {
            return Err(WarehouseError::InvalidInput("minArea is greater than maxArea".into()));
        }
    }
    Ok(())
}

fn project_row(row: &PgRow) -> Result<ListingRecord, sqlx::Error> {
    Ok(ListingRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        city: row.try_get("city")?,
        price: row.try_get("price")?,
        area: row.try_get("area")?,
        rooms: row.try_get("rooms")?,
        url: row.try_get("url")?,
    })
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
