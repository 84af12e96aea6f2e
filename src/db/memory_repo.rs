// src/db/memory_repo.rs

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::DashboardRepository;
use crate::{
    common::error::AppError,
    models::dashboard::{Booking, BookingStatus, Metrics, NewBooking},
};

#[derive(Default)]
struct Store {
    // Ordem de inserção
    bookings: Vec<Booking>,
    team_members: u64,
    ratings: Vec<u8>,
}

/// Repositório em memória: usado quando não há DATABASE_URL e nos testes.
#[derive(Clone, Default)]
pub struct InMemoryDashboardRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryDashboardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_team_members(&self, count: u64) {
        self.store.write().await.team_members = count;
    }

    /// Avaliação de 1 a 5; valores fora da faixa são limitados.
    pub async fn add_rating(&self, rating: u8) {
        self.store.write().await.ratings.push(rating.clamp(1, 5));
    }

    pub async fn with_demo_data() -> Self {
        let repo = Self::new();
        repo.set_team_members(4).await;
        for rating in [5, 5, 4, 5] {
            repo.add_rating(rating).await;
        }

        let demo = [
            ("BK001", "João Silva", "Limpeza Residencial", (2026, 2, 1), BookingStatus::Completed, 120),
            ("BK002", "Maria Souza", "Limpeza Pós-Obra", (2026, 2, 3), BookingStatus::Confirmed, 450),
            ("BK003", "Carlos Lima", "Jardinagem", (2026, 2, 4), BookingStatus::Pending, 90),
            ("BK004", "Ana Costa", "Limpeza Residencial", (2026, 1, 28), BookingStatus::Cancelled, 120),
        ];

        {
            let mut store = repo.store.write().await;
            for (id, client, service, (y, m, d), status, value) in demo {
                if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                    store.bookings.push(Booking {
                        id: id.to_string(),
                        client: client.to_string(),
                        service: service.to_string(),
                        date,
                        status,
                        value: Decimal::from(value),
                    });
                }
            }
        }

        repo
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardRepository {
    async fn metrics(&self) -> Result<Metrics, AppError> {
        let store = self.store.read().await;

        let revenue = store
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.value)
            .sum();
        let customers = store
            .bookings
            .iter()
            .map(|b| b.client.as_str())
            .collect::<HashSet<_>>()
            .len();
        let satisfaction = if store.ratings.is_empty() {
            0.0
        } else {
            store.ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / store.ratings.len() as f64
        };

        Ok(Metrics {
            total_bookings: store.bookings.len() as u64,
            revenue,
            customers: customers as u64,
            team_members: store.team_members,
            satisfaction,
        })
    }

    async fn recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, AppError> {
        let store = self.store.read().await;

        // Mais novos primeiro; o sort é estável, então empates de data mantêm essa ordem.
        let mut bookings: Vec<Booking> = store.bookings.iter().rev().cloned().collect();
        bookings.sort_by(|a, b| b.date.cmp(&a.date));
        bookings.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(bookings)
    }

    async fn create_booking(&self, id: String, booking: NewBooking) -> Result<Booking, AppError> {
        let booking = Booking {
            id,
            client: booking.client,
            service: booking.service,
            date: booking.date,
            status: booking.status,
            value: booking.value,
        };
        self.store.write().await.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        let mut store = self.store.write().await;
        let booking = store
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::BookingNotFound(id.to_string()))?;
        booking.status = status;
        Ok(booking.clone())
    }
}
