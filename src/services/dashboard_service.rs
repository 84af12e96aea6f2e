// src/services/dashboard_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{Booking, BookingStatus, MetricsPayload, NewBooking},
};

pub const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
    recent_limit: i64,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>, recent_limit: i64) -> Self {
        Self { repo, recent_limit: recent_limit.clamp(1, MAX_RECENT_LIMIT) }
    }

    /// Payload completo do painel: indicadores + últimos agendamentos.
    pub async fn metrics_payload(&self, limit: Option<i64>) -> Result<MetricsPayload, AppError> {
        let limit = limit.unwrap_or(self.recent_limit).clamp(1, MAX_RECENT_LIMIT);

        let mut metrics = self.repo.metrics().await?;
        metrics.satisfaction = round_rating(metrics.satisfaction);

        let recent = self.repo.recent_bookings(limit).await?;

        Ok(MetricsPayload::ok(metrics, recent))
    }

    pub async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError> {
        if booking.status == BookingStatus::Unknown {
            return Err(AppError::InvalidStatus);
        }

        let created = self.repo.create_booking(new_booking_id(), booking).await?;
        tracing::info!(id = %created.id, client = %created.client, "Agendamento criado");
        Ok(created)
    }

    pub async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        if status == BookingStatus::Unknown {
            return Err(AppError::InvalidStatus);
        }

        let updated = self.repo.update_status(id, status).await?;
        tracing::info!(id = %updated.id, status = status.as_str(), "Status do agendamento alterado");
        Ok(updated)
    }
}

// "BK" + 8 dígitos hexadecimais
fn new_booking_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("BK{}", hex[..8].to_uppercase())
}

// Uma casa decimal, dentro da escala de 0 a 5.
fn round_rating(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    ((value * 10.0).round() / 10.0).clamp(0.0, 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDashboardRepository;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn booking(status: BookingStatus) -> NewBooking {
        NewBooking {
            client: "João Silva".into(),
            service: "Limpeza Residencial".into(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status,
            value: Decimal::from(120),
        }
    }

    #[test]
    fn booking_ids_have_the_bk_prefix() {
        let id = new_booking_id();
        assert_eq!(id.len(), 10);
        assert!(id.starts_with("BK"));
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn ratings_are_rounded_and_clamped() {
        assert_eq!(round_rating(4.66), 4.7);
        assert_eq!(round_rating(7.0), 5.0);
        assert_eq!(round_rating(f64::NAN), 0.0);
    }

    #[tokio::test]
    async fn payload_is_successful_and_carries_bookings() {
        let repo = InMemoryDashboardRepository::new();
        repo.add_rating(5).await;
        repo.add_rating(4).await;
        repo.add_rating(4).await;
        let service = DashboardService::new(Arc::new(repo), 10);

        service.create_booking(booking(BookingStatus::Completed)).await.unwrap();
        let payload = service.metrics_payload(None).await.unwrap();

        assert!(payload.success);
        let metrics = payload.metrics.unwrap();
        assert_eq!(metrics.total_bookings, 1);
        assert_eq!(metrics.satisfaction, 4.3);
        assert_eq!(payload.recent_bookings.unwrap()[0].client, "João Silva");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let service = DashboardService::new(Arc::new(InMemoryDashboardRepository::new()), 10);

        let err = service.create_booking(booking(BookingStatus::Unknown)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus));
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let service = DashboardService::new(Arc::new(InMemoryDashboardRepository::new()), 10);
        for _ in 0..3 {
            service.create_booking(booking(BookingStatus::Pending)).await.unwrap();
        }

        let payload = service.metrics_payload(Some(0)).await.unwrap();
        assert_eq!(payload.recent_bookings.unwrap().len(), 1);
    }
}
