// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// ---
// Validação Customizada
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    // Qualquer status que o servidor invente não derruba o payload inteiro.
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => BookingStatus::Pending,
            "confirmed" => BookingStatus::Confirmed,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Unknown,
        }
    }

    /// Rótulo exibido no badge do painel.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pendente",
            BookingStatus::Confirmed => "Confirmado",
            BookingStatus::Completed => "Concluído",
            BookingStatus::Cancelled => "Cancelado",
            BookingStatus::Unknown => "Desconhecido",
        }
    }
}

// 1. Agendamento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(example = "BK001")]
    pub id: String,
    #[schema(example = "João Silva")]
    pub client: String,
    #[schema(example = "Limpeza Residencial")]
    pub service: String,
    #[schema(value_type = String, example = "2026-02-01")]
    pub date: NaiveDate,
    pub status: BookingStatus,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 120.0)]
    pub value: Decimal,
}

// 2. Indicadores (os cards do topo)
// Contagens são u64: um valor negativo já falha na desserialização.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_bookings: u64,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 1234.56)]
    pub revenue: Decimal,
    pub customers: u64,
    pub team_members: u64,
    #[validate(range(min = 0.0, max = 5.0, message = "A satisfação deve estar entre 0 e 5."))]
    #[schema(example = 4.8)]
    pub satisfaction: f64,
}

// 3. Resposta do endpoint de métricas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_bookings: Option<Vec<Booking>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricsPayload {
    pub fn ok(metrics: Metrics, recent_bookings: Vec<Booking>) -> Self {
        Self {
            success: true,
            metrics: Some(metrics),
            recent_bookings: Some(recent_bookings),
            error: None,
        }
    }
}

/// Retrato imutável de uma busca bem-sucedida, já validado contra as faixas de
/// `Metrics` e `Booking`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub metrics: Metrics,
    pub recent_bookings: Vec<Booking>,
}

// Dados de entrada já validados para criar um agendamento.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client: String,
    pub service: String,
    pub date: NaiveDate,
    pub status: BookingStatus,
    pub value: Decimal,
}
