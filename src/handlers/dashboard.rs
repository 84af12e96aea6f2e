// src/handlers/dashboard.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{validate_not_negative, Booking, BookingStatus, MetricsPayload, NewBooking},
};

// ---
// Validação Customizada
// ---
fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MetricsQuery {
    /// Quantidade de agendamentos recentes (1 a 100)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "João Silva")]
    pub client: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Limpeza Residencial")]
    pub service: String,

    #[schema(value_type = String, example = "2026-02-01")]
    pub date: NaiveDate,

    pub status: Option<BookingStatus>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 120.0)]
    pub value: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: BookingStatus,
}

// GET /api/admin/metrics
#[utoipa::path(
    get,
    path = "/api/admin/metrics",
    tag = "Dashboard",
    params(MetricsQuery),
    responses(
        (status = 200, description = "Indicadores e agendamentos recentes", body = MetricsPayload),
        (status = 500, description = "Erro interno")
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payload = app_state.dashboard_service.metrics_payload(query.limit).await?;

    Ok((StatusCode::OK, Json(payload)))
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = Booking),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booking = app_state
        .dashboard_service
        .create_booking(NewBooking {
            client: payload.client.trim().to_string(),
            service: payload.service.trim().to_string(),
            date: payload.date,
            status: payload.status.unwrap_or(BookingStatus::Pending),
            value: payload.value,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// PATCH /api/bookings/{id}/status
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = "Bookings",
    request_body = UpdateStatusPayload,
    params(
        ("id" = String, Path, description = "ID do agendamento")
    ),
    responses(
        (status = 200, description = "Status atualizado", body = Booking),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Agendamento não encontrado")
    )
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.dashboard_service.update_status(&id, payload.status).await?;

    Ok((StatusCode::OK, Json(booking)))
}
