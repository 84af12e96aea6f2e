// src/common/logger.rs

//! Logger do processo.
//!
//! Cada linha tem o formato `<timestamp> [<NÍVEL>] <mensagem>`. Quando o
//! evento carrega um erro (campo `&dyn Error` ou um campo `stack`), a cadeia
//! formatada do erro substitui a mensagem. Falhas internas do logger nunca
//! derrubam o processo.

use std::{env, error::Error, fmt, sync::OnceLock};

use chrono::{SecondsFormat, Utc};
use console::Style;
use tracing::{field::Field, Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, MakeWriter},
    registry::LookupSpan,
    EnvFilter,
};

pub const DEFAULT_LEVEL: &str = "info";

static GLOBAL: OnceLock<LoggerConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: String,
    pub ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LEVEL.to_string(), ansi: true }
    }
}

impl LoggerConfig {
    /// Lê `LOG_LEVEL`; ausente ou vazio cai no padrão `info`.
    pub fn from_env() -> Self {
        Self::with_level(env::var("LOG_LEVEL").ok())
    }

    pub fn with_level(level: Option<String>) -> Self {
        let level = level
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .map(|l| normalize_level(&l))
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

        Self { level, ..Self::default() }
    }

    /// Filtro efetivo. Diretivas que o EnvFilter não entende caem no padrão.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

// Nomes do winston que não existem no tracing.
fn normalize_level(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "silly" | "verbose" => "trace".to_string(),
        "http" => "debug".to_string(),
        "warning" => "warn".to_string(),
        _ => level.to_string(),
    }
}

/// Monta o subscriber com qualquer destino de escrita (console, buffer de teste...).
pub fn build_subscriber<W>(config: &LoggerConfig, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    // Erros internos de formatação/escrita são reportados pelo próprio
    // tracing-subscriber (log_internal_errors vem ligado) e o evento é descartado.
    tracing_subscriber::fmt()
        .with_ansi(config.ansi)
        .with_env_filter(config.env_filter())
        .with_writer(writer)
        .event_format(LineFormat::new(config.ansi))
        .finish()
}

/// Inicializa o logger global uma única vez e devolve a configuração ativa.
pub fn init_global(config: LoggerConfig) -> &'static LoggerConfig {
    GLOBAL.get_or_init(|| {
        let subscriber = build_subscriber(&config, std::io::stdout);
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("logger global já instalado: {e}");
        }
        config
    })
}

/// Panics passam pelo logger, com o backtrace no lugar da mensagem.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let stack = format!("{info}\n{backtrace}");
        tracing::error!(stack = %stack, "panic capturado");
    }));
}

// ---
// Formatação da linha
// ---

pub struct LineFormat {
    ansi: bool,
}

impl LineFormat {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    fn style(level: &Level) -> Style {
        match *level {
            Level::ERROR => Style::new().red(),
            Level::WARN => Style::new().yellow(),
            Level::INFO => Style::new().green(),
            Level::DEBUG => Style::new().blue(),
            Level::TRACE => Style::new().magenta(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let level = event.metadata().level();
        let mut line = format!("{timestamp} [{level}] {}", visitor.body());
        for (key, value) in &visitor.fields {
            line.push_str(&format!(" {key}={value}"));
        }

        if self.ansi {
            writeln!(writer, "{}", Self::style(level).force_styling(true).apply_to(line))
        } else {
            writeln!(writer, "{line}")
        }
    }
}

#[derive(Default)]
struct LineVisitor {
    message: Option<String>,
    stack: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl LineVisitor {
    fn body(&self) -> &str {
        self.stack
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or_default()
    }
}

impl tracing::field::Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "stack" => self.stack = Some(value.to_string()),
            name => self.fields.push((name, value.to_string())),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        let stack = error_chain(value);
        if self.stack.is_none() {
            self.stack = Some(stack);
        } else {
            self.fields.push((field.name(), stack));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{value:?}")),
            "stack" => self.stack = Some(format!("{value:?}")),
            name => self.fields.push((name, format!("{value:?}"))),
        }
    }
}

/// Erro e todas as suas causas, uma por linha.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n    caused by: {cause}"));
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("falha ao consultar agendamentos")]
    struct QueryFailed {
        #[source]
        cause: io::Error,
    }

    fn plain(level: Option<&str>) -> LoggerConfig {
        LoggerConfig { ansi: false, ..LoggerConfig::with_level(level.map(String::from)) }
    }

    #[test]
    fn level_defaults_to_info() {
        assert_eq!(LoggerConfig::with_level(None).level, "info");
        assert_eq!(LoggerConfig::with_level(Some("  ".into())).level, "info");
    }

    #[test]
    fn level_comes_from_the_given_name() {
        assert_eq!(LoggerConfig::with_level(Some("debug".into())).level, "debug");
        assert_eq!(LoggerConfig::with_level(Some("verbose".into())).level, "trace");
        assert_eq!(LoggerConfig::with_level(Some("http".into())).level, "debug");
    }

    #[test]
    fn writes_timestamp_level_and_message() {
        let capture = Capture::default();
        let subscriber = build_subscriber(&plain(None), capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(port = 3000, "servidor iniciado");
            tracing::debug!("não deve aparecer");
        });

        let out = capture.contents();
        let line = out.lines().next().unwrap();
        assert!(line.contains("[INFO] servidor iniciado"), "{line}");
        assert!(line.ends_with("port=3000"), "{line}");
        // Timestamp RFC 3339 em UTC no início da linha.
        assert!(line.split(' ').next().unwrap().ends_with('Z'), "{line}");
        assert!(!out.contains("não deve aparecer"));
    }

    #[test]
    fn errors_emit_their_chain_instead_of_the_message() {
        let capture = Capture::default();
        let subscriber = build_subscriber(&plain(None), capture.clone());
        let err = QueryFailed { cause: io::Error::new(io::ErrorKind::TimedOut, "conexão expirou") };

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = &err as &(dyn Error + 'static), "mensagem simples");
        });

        let out = capture.contents();
        assert!(out.contains("[ERROR] falha ao consultar agendamentos"), "{out}");
        assert!(out.contains("caused by: conexão expirou"), "{out}");
        assert!(!out.contains("mensagem simples"), "{out}");
    }

    #[test]
    fn stack_field_replaces_the_message() {
        let capture = Capture::default();
        let subscriber = build_subscriber(&plain(None), capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(stack = "Error: boom\n    at main", "boom");
        });

        let out = capture.contents();
        assert!(out.contains("[WARN] Error: boom\n    at main"), "{out}");
    }

    #[test]
    fn unknown_level_falls_back_without_panicking() {
        let config = plain(Some("backoffice=barulhento"));
        let capture = Capture::default();
        let subscriber = build_subscriber(&config, capture.clone());

        tracing::subscriber::with_default(subscriber, || tracing::info!("ainda registra"));

        assert!(capture.contents().contains("ainda registra"));
    }

    #[test]
    fn ansi_output_is_colorized() {
        let config = LoggerConfig { ansi: true, ..LoggerConfig::default() };
        let capture = Capture::default();
        let subscriber = build_subscriber(&config, capture.clone());

        tracing::subscriber::with_default(subscriber, || tracing::error!("vermelho"));

        assert!(capture.contents().contains("\u{1b}["));
    }
}
