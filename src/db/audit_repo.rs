// src/db/audit_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::audit::{AuditLogEntry, NewAuditLogEntry},
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava fora de transação (ex.: tentativa de verificação recusada).
    pub async fn record(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry, AppError> {
        self.record_with(&self.pool, entry).await
    }

    /// Grava dentro da transação de quem chamou.
    pub async fn record_with<'e, E>(&self, executor: E, entry: NewAuditLogEntry) -> Result<AuditLogEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            INSERT INTO audit_logs (
                organization_id, actor_id, actor_type, action, status,
                resource, resource_id, metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, organization_id, actor_id, actor_type, action, status,
                      resource, resource_id, metadata, created_at
            "#,
        )
        .bind(entry.organization_id)
        .bind(entry.actor_id)
        .bind(entry.actor_type)
        .bind(entry.action)
        .bind(entry.status)
        .bind(entry.resource)
        .bind(entry.resource_id)
        .bind(sqlx::types::Json(entry.metadata))
        .fetch_one(executor)
        .await?;

        Ok(row)
    }
}
