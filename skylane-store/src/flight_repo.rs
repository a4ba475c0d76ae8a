use async_trait::async_trait;
use skylane_core::flight::{Flight, FlightQuery, NewFlight};
use skylane_core::repository::FlightRepository;
use skylane_core::CoreResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::internal;

pub struct SqliteFlightRepository {
    pool: SqlitePool,
}

impl SqliteFlightRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i64,
    source: String,
    destination: String,
    date: String,
    price: f64,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            source: row.source,
            destination: row.destination,
            date: row.date,
            price: row.price,
        }
    }
}

#[async_trait]
impl FlightRepository for SqliteFlightRepository {
    async fn add_flight(&self, flight: &NewFlight) -> CoreResult<Flight> {
        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            INSERT INTO flights (source, destination, date, price)
            VALUES (?, ?, ?, ?)
            RETURNING id, source, destination, date, price
            "#,
        )
        .bind(&flight.source)
        .bind(&flight.destination)
        .bind(&flight.date)
        .bind(flight.price)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)?;

        info!("Flight added: {} {} -> {} on {}", row.id, row.source, row.destination, row.date);
        Ok(row.into())
    }

    async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(
            "SELECT id, source, destination, date, price FROM flights ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn search_flights(&self, query: &FlightQuery) -> CoreResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT id, source, destination, date, price
            FROM flights
            WHERE destination = ? AND source = ? AND date = ?
            ORDER BY id
            "#,
        )
        .bind(&query.destination)
        .bind(&query.source)
        .bind(&query.date)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn get_flight(&self, id: i64) -> CoreResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(
            "SELECT id, source, destination, date, price FROM flights WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        Ok(row.map(Flight::from))
    }

    async fn remove_flight(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM flights WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Flight removed: {}", id);
        }
        Ok(removed)
    }

    async fn count_flights(&self) -> CoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flights")
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;
        Ok(count)
    }
}
