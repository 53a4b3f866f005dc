// src/db/staff_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::verification::StaffCredential};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_staff_id(
        &self,
        organization_id: Uuid,
        staff_id: Uuid,
    ) -> Result<Option<StaffCredential>, AppError> {
        let credential = sqlx::query_as::<_, StaffCredential>(
            r#"
            SELECT staff_id, organization_id, display_name, role, pin_hash,
                   controlled_drug_authority, is_active
            FROM staff_credentials
            WHERE organization_id = $1 AND staff_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    pub async fn find_by_badge(
        &self,
        organization_id: Uuid,
        badge_code: &str,
    ) -> Result<Option<StaffCredential>, AppError> {
        let credential = sqlx::query_as::<_, StaffCredential>(
            r#"
            SELECT staff_id, organization_id, display_name, role, pin_hash,
                   controlled_drug_authority, is_active
            FROM staff_credentials
            WHERE organization_id = $1 AND badge_code = $2
            "#,
        )
        .bind(organization_id)
        .bind(badge_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }
}
