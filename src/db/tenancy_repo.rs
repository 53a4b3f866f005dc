// src/db/tenancy_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::tenancy::Organization};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca a organização da sessão. Campos anuláveis voltam como estão;
    /// quem valida é a montagem do contexto.
    pub async fn find_organization(&self, organization_id: Uuid) -> Result<Option<Organization>, AppError> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, tenant_id, name, region, timezone, features, settings
            FROM organizations
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }
}
