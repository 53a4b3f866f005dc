// src/models/region.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Jurisdição regulatória do tenant.
///
/// No fio (JSON / banco) usa os códigos `UK_ENGLAND`, `UK_WALES`...;
/// nas rotas usa as chaves curtas (`england`, `wales`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    UkEngland,
    UkWales,
    UkScotland,
    UkNorthernIreland,
    Ireland,
}

/// Chave usada quando o caminho não traz segmento de região.
pub const DEFAULT_REGION_KEY: &str = "england";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised region '{0}'")]
pub struct UnknownRegion(pub String);

impl Region {
    pub const COUNT: usize = 5;

    pub const ALL: [Region; Region::COUNT] = [
        Region::UkEngland,
        Region::UkWales,
        Region::UkScotland,
        Region::UkNorthernIreland,
        Region::Ireland,
    ];

    /// Posição estável no `ALL`, usada como índice das tabelas por região.
    pub const fn index(self) -> usize {
        match self {
            Region::UkEngland => 0,
            Region::UkWales => 1,
            Region::UkScotland => 2,
            Region::UkNorthernIreland => 3,
            Region::Ireland => 4,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Region::UkEngland => "england",
            Region::UkWales => "wales",
            Region::UkScotland => "scotland",
            Region::UkNorthernIreland => "northern-ireland",
            Region::Ireland => "ireland",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Region::UkEngland => "UK_ENGLAND",
            Region::UkWales => "UK_WALES",
            Region::UkScotland => "UK_SCOTLAND",
            Region::UkNorthernIreland => "UK_NORTHERN_IRELAND",
            Region::Ireland => "IRELAND",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, UnknownRegion> {
        Region::ALL
            .into_iter()
            .find(|r| r.key() == key)
            .ok_or_else(|| UnknownRegion(key.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// Aceita tanto o código (`UK_WALES`) quanto a chave de rota (`wales`).
impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .map_or_else(|| Region::from_key(s), Ok)
    }
}
