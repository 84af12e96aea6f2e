// src/db/dashboard_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    models::dashboard::{Booking, BookingStatus, Metrics, NewBooking},
};

/// Fonte de verdade dos agendamentos e dos indicadores do painel.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Indicadores agregados (satisfação ainda sem arredondamento).
    async fn metrics(&self) -> Result<Metrics, AppError>;

    /// Agendamentos mais recentes primeiro (data desc, depois criação desc).
    async fn recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, AppError>;

    async fn create_booking(&self, id: String, booking: NewBooking) -> Result<Booking, AppError>;

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
}

// Linha crua da tabela 'bookings' (status é TEXT no banco).
#[derive(Debug, FromRow)]
struct BookingRow {
    id: String,
    client: String,
    service: String,
    date: NaiveDate,
    status: String,
    value: Decimal,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            client: row.client,
            service: row.service,
            date: row.date,
            status: BookingStatus::parse(&row.status),
            value: row.value,
        }
    }
}

// COUNT(*) do Postgres vem como BIGINT.
fn count(value: i64) -> Result<u64, AppError> {
    u64::try_from(value).map_err(|e| AppError::InternalServerError(e.into()))
}

#[derive(Clone)]
pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn metrics(&self) -> Result<Metrics, AppError> {
        // Snapshot consistente dos três agregados
        let mut tx = self.pool.begin().await?;

        let (total_bookings, revenue, customers): (i64, Decimal, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*)::BIGINT,
                COALESCE(SUM(value) FILTER (WHERE status = 'completed'), 0)::NUMERIC,
                COUNT(DISTINCT client)::BIGINT
            FROM bookings
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let team_members: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM team_members WHERE is_active = true",
        )
        .fetch_one(&mut *tx)
        .await?;

        let satisfaction: Option<f64> = sqlx::query_scalar("SELECT AVG(rating)::FLOAT8 FROM reviews")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Metrics {
            total_bookings: count(total_bookings)?,
            revenue,
            customers: count(customers)?,
            team_members: count(team_members)?,
            satisfaction: satisfaction.unwrap_or(0.0),
        })
    }

    async fn recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, client, service, date, status, value
            FROM bookings
            ORDER BY date DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn create_booking(&self, id: String, booking: NewBooking) -> Result<Booking, AppError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (id, client, service, date, status, value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, client, service, date, status, value
            "#,
        )
        .bind(id)
        .bind(booking.client)
        .bind(booking.service)
        .bind(booking.date)
        .bind(booking.status.as_str())
        .bind(booking.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE bookings SET status = $2
            WHERE id = $1
            RETURNING id, client, service, date, status, value
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Booking::from)
        .ok_or_else(|| AppError::BookingNotFound(id.to_string()))
    }
}
