// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

pub const DEFAULT_LANG: &str = "pt";

// Extrator de idioma: usado para formatar moeda, números e datas do painel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn is_portuguese(&self) -> bool {
        self.0.eq_ignore_ascii_case("pt")
    }

    /// Idioma principal de um cabeçalho Accept-Language ("pt-BR,en;q=0.8" -> "pt").
    pub fn from_header(header_str: &str) -> Option<Self> {
        accept_language::parse(header_str)
            .first()
            .map(|tag_string| {
                // "pt-BR" -> split vira ["pt", "BR"] -> next() pega "pt"
                tag_string.split('-').next().unwrap_or(tag_string).to_lowercase()
            })
            .filter(|lang| !lang.is_empty() && lang != "*")
            .map(Locale)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}
