// src/models/beds.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bed_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BedState {
    Occupied,
    Available,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedStatus {
    pub id: Uuid,
    #[schema(example = "12A")]
    pub number: String,
    pub status: BedState,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "maintenance_state", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceState {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatus {
    pub id: Uuid,
    /// Leito afetado (só referência, não é dono)
    pub bed_id: Uuid,
    #[serde(rename = "type")]
    #[schema(example = "mattress replacement")]
    pub kind: String,
    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-03-04")]
    pub expected_end_date: NaiveDate,
    pub status: MaintenanceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyMetrics {
    pub total: u32,
    pub occupied: u32,
    pub available: u32,
    pub maintenance: u32,
    /// occupied / total, entre 0 e 1
    #[schema(example = 0.7)]
    pub occupancy_rate: f64,
}

impl OccupancyMetrics {
    /// Com `total == 0` a taxa é 0. Contagens incoerentes (occupied > total)
    /// ficam limitadas a 1.
    pub fn from_counts(total: u32, occupied: u32, available: u32, maintenance: u32) -> Self {
        let occupancy_rate = if total == 0 {
            0.0
        } else {
            (f64::from(occupied) / f64::from(total)).clamp(0.0, 1.0)
        };

        Self {
            total,
            occupied,
            available,
            maintenance,
            occupancy_rate,
        }
    }

    pub fn from_beds(beds: &[BedStatus]) -> Self {
        let count = |state: BedState| beds.iter().filter(|b| b.status == state).count() as u32;
        Self::from_counts(
            beds.len() as u32,
            count(BedState::Occupied),
            count(BedState::Available),
            count(BedState::Maintenance),
        )
    }
}
