// src/ui/admin_panel.rs

//! Painel administrativo: busca o payload de métricas uma vez e renderiza
//! um de três estados (carregando, pronto ou falha).

use std::sync::Arc;

use leptos::*;
use rust_decimal::Decimal;
use validator::Validate;

use super::metrics_source::{FetchError, MetricsSource};
use crate::{
    common::currency::{format_currency, format_date, format_number},
    middleware::i18n::Locale,
    models::dashboard::{Booking, Metrics, MetricsPayload, MetricsSnapshot},
};

pub const TITLE: &str = "Dashboard";

#[derive(Debug)]
pub enum PanelState {
    Loading,
    Ready(MetricsSnapshot),
    Failed(FetchError),
}

/// O que o componente precisa saber do estado. A causa da falha fica só no log.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Ready(MetricsSnapshot),
    Failed,
}

impl From<&PanelState> for PanelView {
    fn from(state: &PanelState) -> Self {
        match state {
            PanelState::Loading => PanelView::Loading,
            PanelState::Ready(snapshot) => PanelView::Ready(snapshot.clone()),
            PanelState::Failed(_) => PanelView::Failed,
        }
    }
}

pub struct AdminPanel {
    source: Arc<dyn MetricsSource>,
    locale: Locale,
    state: PanelState,
}

impl AdminPanel {
    pub fn new(source: Arc<dyn MetricsSource>, locale: Locale) -> Self {
        Self { source, locale, state: PanelState::Loading }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn view(&self) -> PanelView {
        PanelView::from(&self.state)
    }

    /// Faz exatamente uma busca e troca o estado pelo resultado.
    ///
    /// Erros nunca sobem para quem chamou: viram `PanelState::Failed`.
    /// Se o future for descartado antes de terminar, o painel continua em
    /// `Loading`. Cargas repetidas são sequenciais (`&mut self`), e a última
    /// a terminar define o estado.
    pub async fn load(&mut self) {
        let result = self.source.fetch().await.and_then(into_snapshot);

        self.state = match result {
            Ok(snapshot) => PanelState::Ready(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "Falha ao carregar métricas do painel");
                PanelState::Failed(err)
            }
        };
    }

    /// Só o fragmento do painel, sem cabeçalho nem documento.
    pub fn render(&self) -> String {
        let panel = self.view();
        let locale = self.locale.clone();
        leptos::ssr::render_to_string(move || view! { <AdminPanelView panel=panel locale=locale/> })
            .to_string()
    }
}

// Só aceita o payload com success = true, o bloco de métricas presente e
// tudo dentro das faixas válidas.
fn into_snapshot(payload: MetricsPayload) -> Result<MetricsSnapshot, FetchError> {
    if !payload.success {
        return Err(FetchError::Unsuccessful(payload.error));
    }
    let metrics = payload.metrics.ok_or(FetchError::MissingMetrics)?;
    metrics.validate()?;

    let recent_bookings = payload.recent_bookings.unwrap_or_default();
    for booking in &recent_bookings {
        booking.validate()?;
    }

    Ok(MetricsSnapshot { metrics, recent_bookings })
}

#[component]
pub fn AdminPanelView(panel: PanelView, locale: Locale) -> impl IntoView {
    let content = match panel {
        PanelView::Loading => view! {
            <div class="loading" role="status" aria-live="polite">"Carregando métricas..."</div>
        }
        .into_view(),
        PanelView::Ready(MetricsSnapshot { metrics, recent_bookings }) => {
            let bookings = (!recent_bookings.is_empty())
                .then(|| view! { <RecentBookings bookings=recent_bookings locale=locale.clone()/> });
            view! {
                <MetricCards metrics=metrics locale=locale/>
                {bookings}
            }
            .into_view()
        }
        PanelView::Failed => view! {
            <div class="empty-state" role="alert">"Não foi possível carregar as métricas no momento."</div>
        }
        .into_view(),
    };

    view! {
        <section class="admin-panel">
            <h1>{TITLE}</h1>
            {content}
        </section>
    }
}

#[component]
fn MetricCards(metrics: Metrics, locale: Locale) -> impl IntoView {
    let satisfaction = Decimal::from_f64_retain(metrics.satisfaction).unwrap_or_default();
    let cards = [
        ("Total Agendamentos", format_number(Decimal::from(metrics.total_bookings), 0, &locale)),
        ("Receita", format_currency(metrics.revenue, &locale)),
        ("Clientes", format_number(Decimal::from(metrics.customers), 0, &locale)),
        ("Equipe", format_number(Decimal::from(metrics.team_members), 0, &locale)),
        ("Satisfação", format!("{} / 5", format_number(satisfaction, 1, &locale))),
    ];

    view! {
        <div class="cards">
            {cards
                .into_iter()
                .map(|(label, value)| view! {
                    <div class="card">
                        <div class="card-label">{label}</div>
                        <div class="card-value">{value}</div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn RecentBookings(bookings: Vec<Booking>, locale: Locale) -> impl IntoView {
    view! {
        <h2 id="agendamentos">"Agendamentos Recentes"</h2>
        <table>
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Cliente"</th>
                    <th>"Serviço"</th>
                    <th>"Data"</th>
                    <th>"Status"</th>
                    <th>"Valor"</th>
                </tr>
            </thead>
            <tbody>
                {bookings
                    .into_iter()
                    .map(|booking| {
                        let date = format_date(booking.date, &locale);
                        let value = format_currency(booking.value, &locale);
                        let badge = format!("badge badge-{}", booking.status.as_str());
                        view! {
                            <tr>
                                <td>{booking.id}</td>
                                <td>{booking.client}</td>
                                <td>{booking.service}</td>
                                <td>{date}</td>
                                <td><span class=badge>{booking.status.label()}</span></td>
                                <td>{value}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
