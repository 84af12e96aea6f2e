//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;

use backoffice::{
    build_router,
    common::logger::{self, LoggerConfig},
    config::{AppConfig, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logger global: nível via LOG_LEVEL, panics passam por ele.
    let logger_config = logger::init_global(LoggerConfig::from_env());
    logger::install_panic_hook();
    tracing::debug!("Logger iniciado com nível {}", logger_config.level);

    let config = AppConfig::from_env()?;

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app)
        .await
        .context("Erro no servidor Axum")?;

    Ok(())
}
