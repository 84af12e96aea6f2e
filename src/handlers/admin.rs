// src/handlers/admin.rs

use axum::{extract::State, response::Html};

use crate::{
    config::AppState,
    middleware::i18n::Locale,
    ui::{
        admin_panel::{AdminPanel, PanelState, TITLE},
        html,
    },
};

// Intervalo do auto-refresh quando a busca estoura o tempo
const LOADING_REFRESH_SECS: u64 = 5;

// GET /admin
pub async fn admin_page(State(app_state): State<AppState>, locale: Locale) -> Html<String> {
    let mut panel = AdminPanel::new(app_state.metrics_source.clone(), locale);

    match app_state.admin_fetch_timeout {
        Some(limit) => {
            if tokio::time::timeout(limit, panel.load()).await.is_err() {
                tracing::warn!("Busca de métricas excedeu {:?}; painel renderizado carregando", limit);
            }
        }
        None => panel.load().await,
    }

    let refresh = matches!(panel.state(), PanelState::Loading).then_some(LOADING_REFRESH_SECS);
    Html(html::render_page(TITLE, panel.view(), panel.locale().clone(), refresh))
}
