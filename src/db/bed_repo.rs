// src/db/bed_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::beds::{BedStatus, MaintenanceStatus},
};

// Só leitura: leitos e manutenções são gravados pelo módulo de leitos.
#[derive(Clone)]
pub struct BedRepository {
    pool: PgPool,
}

impl BedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_beds(&self, organization_id: Uuid) -> Result<Vec<BedStatus>, AppError> {
        let beds = sqlx::query_as::<_, BedStatus>(
            r#"
            SELECT id, number, status, last_updated
            FROM beds
            WHERE organization_id = $1
            ORDER BY number
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(beds)
    }

    /// Manutenções ainda relevantes: abertas, ou concluídas nos últimos 30 dias.
    pub async fn list_maintenance(&self, organization_id: Uuid) -> Result<Vec<MaintenanceStatus>, AppError> {
        let items = sqlx::query_as::<_, MaintenanceStatus>(
            r#"
            SELECT m.id, m.bed_id, m.kind, m.start_date, m.expected_end_date, m.status
            FROM bed_maintenance m
            JOIN beds b ON b.id = m.bed_id
            WHERE b.organization_id = $1
              AND (m.status <> 'completed' OR m.expected_end_date >= CURRENT_DATE - INTERVAL '30 days')
            ORDER BY m.expected_end_date ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
