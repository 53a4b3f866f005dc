// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{BankImport, BankImportPayload, BankTransactionPayload},
};

#[derive(Clone, Default)]
pub struct FinanceRepository;

impl FinanceRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  IMPORTAÇÃO DE EXTRATO
    // =========================================================================

    pub async fn create_bank_import<'e, E>(
        &self,
        executor: E,
        organization_id: Uuid,
        imported_by: Uuid,
        payload: &BankImportPayload,
    ) -> Result<BankImport, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (total_credits, total_debits) = payload.totals();

        let import = sqlx::query_as::<_, BankImport>(
            r#"
            INSERT INTO bank_imports (
                organization_id, account_name, sort_code, account_number,
                statement_date, line_count, total_credits, total_debits, imported_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, organization_id, account_name, sort_code, account_number,
                      statement_date, line_count, total_credits, total_debits,
                      imported_by, created_at
            "#,
        )
        .bind(organization_id)
        .bind(&payload.account_name)
        .bind(payload.normalized_sort_code())
        .bind(&payload.account_number)
        .bind(payload.statement_date)
        .bind(payload.transactions.len() as i32)
        .bind(total_credits)
        .bind(total_debits)
        .bind(imported_by)
        .fetch_one(executor)
        .await?;

        Ok(import)
    }

    /// Inserção em massa das linhas usando UNNEST
    pub async fn insert_transactions<'e, E>(
        &self,
        executor: E,
        import_id: Uuid,
        transactions: &[BankTransactionPayload],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dates: Vec<NaiveDate> = transactions.iter().map(|t| t.date).collect();
        let descriptions: Vec<String> = transactions.iter().map(|t| t.description.clone()).collect();
        let amounts: Vec<Decimal> = transactions.iter().map(|t| t.amount).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO bank_import_lines (import_id, line_date, description, amount)
            SELECT $1, * FROM UNNEST($2::date[], $3::text[], $4::numeric[])
            "#,
        )
        .bind(import_id)
        .bind(dates)
        .bind(descriptions)
        .bind(amounts)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
