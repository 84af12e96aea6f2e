// src/ui/metrics_source.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::{models::dashboard::MetricsPayload, services::DashboardService};

/// Motivos pelos quais o painel não conseguiu um payload utilizável.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Falha de rede ao buscar métricas: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint de métricas respondeu com status {0}")]
    Status(u16),

    #[error("Endpoint de métricas sinalizou falha: {}", .0.as_deref().unwrap_or("sem detalhes"))]
    Unsuccessful(Option<String>),

    #[error("Payload de métricas sem o bloco 'metrics'")]
    MissingMetrics,

    #[error("Payload de métricas fora das faixas válidas: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Erro no serviço de métricas: {0}")]
    Service(String),
}

/// De onde o painel busca o payload de métricas.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self) -> Result<MetricsPayload, FetchError>;
}

// GET em um endpoint remoto de métricas.
#[derive(Clone)]
pub struct HttpMetricsSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMetricsSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn fetch(&self) -> Result<MetricsPayload, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.json::<MetricsPayload>().await?)
    }
}

// Chama o serviço no mesmo processo, sem passar pela rede.
#[derive(Clone)]
pub struct ServiceMetricsSource {
    service: DashboardService,
}

impl ServiceMetricsSource {
    pub fn new(service: DashboardService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl MetricsSource for ServiceMetricsSource {
    async fn fetch(&self) -> Result<MetricsPayload, FetchError> {
        self.service
            .metrics_payload(None)
            .await
            .map_err(|e| FetchError::Service(e.to_string()))
    }
}
