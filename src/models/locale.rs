// src/models/locale.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::region::Region;

/// Preferências de idioma/região da sessão de UI. Criado uma vez, nunca mutado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    #[schema(example = "en-GB")]
    pub language: String,
    #[schema(example = "GB")]
    pub region: String,
    #[schema(example = "GBP")]
    pub currency: String,
    #[schema(example = "Europe/London")]
    pub timezone: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: "en-GB".into(),
            region: "GB".into(),
            currency: "GBP".into(),
            timezone: "Europe/London".into(),
        }
    }
}

impl LocaleConfig {
    /// Monta a configuração para a jurisdição do tenant, mantendo o idioma pedido.
    pub fn for_region(region: Region, language: &str) -> Self {
        let (country, currency, timezone) = match region {
            Region::Ireland => ("IE", "EUR", "Europe/Dublin"),
            // Irlanda do Norte é UK: libra e horário de Londres
            Region::UkEngland | Region::UkWales | Region::UkScotland | Region::UkNorthernIreland => {
                ("GB", "GBP", "Europe/London")
            }
        };

        let language = if language.contains('-') {
            language.to_string()
        } else {
            format!("{}-{}", language, country)
        };

        Self {
            language,
            region: country.into(),
            currency: currency.into(),
            timezone: timezone.into(),
        }
    }
}
