// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::models::{locale::LocaleConfig, region::Region};

/// Idiomas com tradução nas telas (inglês, galês, irlandês, gaélico escocês).
pub const SUPPORTED_LANGUAGES: [&str; 4] = ["en", "cy", "ga", "gd"];

const DEFAULT_LANGUAGE: &str = "en";

// Extrator de idioma (Accept-Language), só com subtags primárias suportadas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    /// Primeiro idioma suportado na ordem de preferência do cliente.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .into_iter()
                    // "cy-GB" -> "cy"
                    .map(|tag| tag.split('-').next().unwrap_or_default().to_ascii_lowercase())
                    .find(|primary| SUPPORTED_LANGUAGES.contains(&primary.as_str()))
            })
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Locale(lang)
    }

    pub fn config_for(&self, region: Region) -> LocaleConfig {
        LocaleConfig::for_region(region, &self.0)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}
