// src/db/rbac_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Slugs das permissões do cargo dentro da organização.
    pub async fn permissions_for_role(&self, organization_id: Uuid, role: &str) -> Result<Vec<String>, AppError> {
        let permissions = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission
            FROM role_permissions
            WHERE organization_id = $1 AND role = $2
            ORDER BY permission
            "#,
        )
        .bind(organization_id)
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }
}
