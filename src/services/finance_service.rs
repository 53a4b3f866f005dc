// src/services/finance_service.rs

use serde_json::json;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{AuditRepository, FinanceRepository},
    models::{
        audit::{AuditLogAction, AuditLogActorType, AuditLogStatus, NewAuditLogEntry},
        auth::Session,
        finance::{BankImport, BankImportPayload},
        tenancy::TenantContext,
    },
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    audit_repo: AuditRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, audit_repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, audit_repo, pool }
    }

    /// Grava o extrato, as linhas e o registro de auditoria numa transação só.
    /// O payload já chega validado.
    pub async fn import_bank_statement(
        &self,
        ctx: &TenantContext,
        session: &Session,
        payload: &BankImportPayload,
    ) -> Result<BankImport, AppError> {
        let mut tx = self.pool.begin().await?;

        let import = self
            .repo
            .create_bank_import(&mut *tx, ctx.organization_id(), session.user_id, payload)
            .await?;

        let inserted = self
            .repo
            .insert_transactions(&mut *tx, import.id, &payload.transactions)
            .await?;

        self.audit_repo
            .record_with(
                &mut *tx,
                NewAuditLogEntry {
                    organization_id: ctx.organization_id(),
                    actor_id: session.user_id,
                    actor_type: AuditLogActorType::User,
                    action: AuditLogAction::Import,
                    status: AuditLogStatus::Success,
                    resource: "bank_import",
                    resource_id: Some(import.id),
                    metadata: json!({ "lines": inserted, "statementDate": payload.statement_date }),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            organization_id = %ctx.organization_id(),
            import_id = %import.id,
            lines = inserted,
            "bank statement imported"
        );
        Ok(import)
    }
}
