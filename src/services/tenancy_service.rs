// src/services/tenancy_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{RbacRepository, TenantRepository},
    models::{
        auth::Session,
        tenancy::{Organization, TenantContext, TenantContextError, TenantContextParts},
    },
};

/// De onde vêm organização e permissões na montagem do contexto.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    async fn find_organization(&self, organization_id: Uuid) -> Result<Option<Organization>, AppError>;

    async fn permissions_for_role(&self, organization_id: Uuid, role: &str) -> Result<Vec<String>, AppError>;
}

#[derive(Clone)]
pub struct PgOrganizationDirectory {
    tenant_repo: TenantRepository,
    rbac_repo: RbacRepository,
}

impl PgOrganizationDirectory {
    pub fn new(tenant_repo: TenantRepository, rbac_repo: RbacRepository) -> Self {
        Self { tenant_repo, rbac_repo }
    }
}

#[async_trait]
impl OrganizationDirectory for PgOrganizationDirectory {
    async fn find_organization(&self, organization_id: Uuid) -> Result<Option<Organization>, AppError> {
        self.tenant_repo.find_organization(organization_id).await
    }

    async fn permissions_for_role(&self, organization_id: Uuid, role: &str) -> Result<Vec<String>, AppError> {
        self.rbac_repo.permissions_for_role(organization_id, role).await
    }
}

#[derive(Clone)]
pub struct TenantService {
    directory: Arc<dyn OrganizationDirectory>,
}

impl TenantService {
    pub fn new(directory: Arc<dyn OrganizationDirectory>) -> Self {
        Self { directory }
    }

    /// Monta o contexto do tenant para a sessão. Tudo ou nada: qualquer
    /// campo faltando impede o contexto de existir.
    pub async fn build_context(&self, session: &Session) -> Result<TenantContext, AppError> {
        let org_id = session.organization_id;

        // As duas consultas são independentes
        let (organization, permissions) = tokio::try_join!(
            self.directory.find_organization(org_id),
            self.directory.permissions_for_role(org_id, &session.role),
        )?;

        let organization = organization.ok_or(TenantContextError::OrganizationNotFound(org_id))?;
        let parts = TenantContextParts::from_lookup(session, organization, permissions)?;
        let context = TenantContext::try_from(parts)?;

        tracing::debug!(
            organization_id = %context.organization_id(),
            tenant_id = %context.tenant_id(),
            region = %context.region(),
            "tenant context built"
        );
        Ok(context)
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryDirectory;
    use super::*;
    use crate::models::{region::Region, settings::TenantSettings};
    use sqlx::types::Json;

    fn setup(region: &str) -> (MemoryDirectory, Session) {
        let org_id = Uuid::new_v4();
        let mut directory = MemoryDirectory::default();
        directory.organizations.insert(
            org_id,
            Organization {
                id: org_id,
                tenant_id: Some(Uuid::new_v4()),
                name: "Heather Lodge".into(),
                region: Some(region.into()),
                timezone: Some("Europe/London".into()),
                features: vec!["bed-management".into()],
                settings: Json(TenantSettings::default()),
            },
        );
        directory
            .permissions
            .insert((org_id, "nurse".into()), vec!["beds:read".into()]);

        let session = Session {
            user_id: Uuid::new_v4(),
            organization_id: org_id,
            role: "nurse".into(),
            email: "nurse@heather.example".into(),
        };
        (directory, session)
    }

    #[tokio::test]
    async fn builds_context_with_role_permissions() {
        let (directory, session) = setup("UK_SCOTLAND");
        let service = TenantService::new(Arc::new(directory));

        let ctx = service.build_context(&session).await.unwrap();
        assert_eq!(ctx.region(), Region::UkScotland);
        assert!(ctx.has_permission("beds:read"));
        assert!(ctx.has_feature("bed-management"));
    }

    #[tokio::test]
    async fn unknown_organization_is_a_tenant_error() {
        let (directory, mut session) = setup("UK_ENGLAND");
        session.organization_id = Uuid::new_v4();
        let service = TenantService::new(Arc::new(directory));

        let err = service.build_context(&session).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::TenantContext(TenantContextError::OrganizationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn bad_region_never_produces_a_context() {
        let (directory, session) = setup("UK_CORNWALL");
        let service = TenantService::new(Arc::new(directory));

        let err = service.build_context(&session).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::TenantContext(TenantContextError::UnknownRegion(_))
        ));
    }

    #[tokio::test]
    async fn role_without_permissions_gets_an_empty_set() {
        let (directory, mut session) = setup("IRELAND");
        session.role = "visitor".into();
        let service = TenantService::new(Arc::new(directory));

        let ctx = service.build_context(&session).await.unwrap();
        assert!(!ctx.has_permission("beds:read"));
    }
}
