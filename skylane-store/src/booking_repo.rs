use async_trait::async_trait;
use skylane_core::booking::{Booking, BookingDetails, NewBooking};
use skylane_core::repository::BookingRepository;
use skylane_core::{CoreError, CoreResult};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::internal;

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    flight_id: i64,
    name: String,
    email: String,
    phone: String,
}

#[derive(sqlx::FromRow)]
struct BookingDetailsRow {
    id: i64,
    source: String,
    destination: String,
    date: String,
    price: f64,
    name: String,
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn add_booking(&self, booking: &NewBooking) -> CoreResult<Booking> {
        // The flight_id foreign key is the only existence check.
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (flight_id, name, email, phone)
            VALUES (?, ?, ?, ?)
            RETURNING id, flight_id, name, email, phone
            "#,
        )
        .bind(booking.flight_id)
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_foreign_key_violation() {
                    return CoreError::UnknownFlight(booking.flight_id);
                }
            }
            internal(e)
        })?;

        info!("Booking created: {} on flight {}", row.id, row.flight_id);

        Ok(Booking {
            id: row.id,
            flight_id: row.flight_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
        })
    }

    async fn list_bookings(&self) -> CoreResult<Vec<BookingDetails>> {
        let rows = sqlx::query_as::<_, BookingDetailsRow>(
            r#"
            SELECT b.id, f.source, f.destination, f.date, f.price, b.name
            FROM bookings b
            JOIN flights f ON b.flight_id = f.id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;

        Ok(rows
            .into_iter()
            .map(|row| BookingDetails {
                id: row.id,
                source: row.source,
                destination: row.destination,
                date: row.date,
                price: row.price,
                name: row.name,
            })
            .collect())
    }

    async fn clear_bookings(&self) -> CoreResult<u64> {
        let result = sqlx::query("DELETE FROM bookings")
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        info!("Cleared {} bookings", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn count_bookings(&self) -> CoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;
        Ok(count)
    }
}
