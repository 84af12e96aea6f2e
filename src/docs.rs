// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_metrics,

        // --- Bookings ---
        handlers::dashboard::create_booking,
        handlers::dashboard::update_booking_status,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::Metrics,
            models::dashboard::MetricsPayload,
            models::dashboard::Booking,
            models::dashboard::BookingStatus,

            // --- Payloads ---
            handlers::dashboard::CreateBookingPayload,
            handlers::dashboard::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores do painel administrativo"),
        (name = "Bookings", description = "Gestão de Agendamentos")
    )
)]
pub struct ApiDoc;
