// src/config.rs

use crate::{
    db::{DashboardRepository, InMemoryDashboardRepository, PgDashboardRepository},
    services::{dashboard_service::MAX_RECENT_LIMIT, DashboardService},
    ui::metrics_source::{HttpMetricsSource, MetricsSource, ServiceMetricsSource},
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc, time::Duration};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub metrics_url: Option<String>,
    pub recent_limit: i64,
    pub admin_fetch_timeout: Option<Duration>,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            metrics_url: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            admin_fetch_timeout: None,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte de chaves (o ambiente, nos binários).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let recent_limit = match var("RECENT_BOOKINGS_LIMIT") {
            Some(raw) => {
                let limit: i64 = raw
                    .parse()
                    .with_context(|| format!("RECENT_BOOKINGS_LIMIT inválido: {raw}"))?;
                anyhow::ensure!(
                    (1..=MAX_RECENT_LIMIT).contains(&limit),
                    "RECENT_BOOKINGS_LIMIT deve estar entre 1 e {MAX_RECENT_LIMIT}"
                );
                limit
            }
            None => defaults.recent_limit,
        };

        let admin_fetch_timeout = var("ADMIN_FETCH_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("ADMIN_FETCH_TIMEOUT_SECS inválido: {raw}"))
            })
            .transpose()?;

        let seed_demo_data = var("SEED_DEMO_DATA")
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_demo_data);

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: var("DATABASE_URL"),
            metrics_url: var("METRICS_URL"),
            recent_limit,
            admin_fetch_timeout,
            seed_demo_data,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub metrics_source: Arc<dyn MetricsSource>,
    pub admin_fetch_timeout: Option<Duration>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn DashboardRepository> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgDashboardRepository::new(db_pool))
            }
            None if config.seed_demo_data => {
                tracing::warn!("DATABASE_URL ausente: usando repositório em memória com dados de demonstração");
                Arc::new(InMemoryDashboardRepository::with_demo_data().await)
            }
            None => {
                tracing::warn!("DATABASE_URL ausente: usando repositório em memória");
                Arc::new(InMemoryDashboardRepository::new())
            }
        };

        let dashboard_service = DashboardService::new(repo, config.recent_limit);

        let metrics_source: Arc<dyn MetricsSource> = match &config.metrics_url {
            Some(url) => {
                tracing::info!("Painel buscando métricas em {}", url);
                Arc::new(HttpMetricsSource::new(reqwest::Client::new(), url.clone()))
            }
            None => Arc::new(ServiceMetricsSource::new(dashboard_service.clone())),
        };

        Ok(Self {
            dashboard_service,
            metrics_source,
            admin_fetch_timeout: config.admin_fetch_timeout,
        })
    }

    /// Estado sobre um repositório já pronto, com o painel lendo do próprio serviço.
    pub fn with_repository(repo: Arc<dyn DashboardRepository>, recent_limit: i64) -> Self {
        let dashboard_service = DashboardService::new(repo, recent_limit);
        let metrics_source = Arc::new(ServiceMetricsSource::new(dashboard_service.clone()));
        Self { dashboard_service, metrics_source, admin_fetch_timeout: None }
    }
}
