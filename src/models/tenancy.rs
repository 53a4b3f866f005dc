// src/models/tenancy.rs

use std::collections::BTreeSet;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    auth::Session,
    region::Region,
    settings::TenantSettings,
};

// ---
// 1. Organization (linha da tabela `organizations`)
// ---
// Colunas anuláveis de propósito: uma organização mal cadastrada
// precisa ser barrada na montagem do contexto, não no SELECT.
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub name: String,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub features: Vec<String>,
    pub settings: Json<TenantSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantContextError {
    #[error("tenant context is missing '{0}'")]
    MissingField(&'static str),

    #[error("unrecognised region '{0}'")]
    UnknownRegion(String),

    #[error("'{0}' is not an IANA timezone")]
    InvalidTimezone(String),

    #[error("organization {0} does not exist")]
    OrganizationNotFound(Uuid),

    #[error("session belongs to organization {session} but lookup returned {found}")]
    OrganizationMismatch { session: Uuid, found: Uuid },

    #[error("organization lookup is unavailable")]
    LookupUnavailable,
}

// ---
// 2. TenantContextParts (entrada sem validação)
// ---
/// Forma "crua" do contexto: tudo opcional. Só vira `TenantContext`
/// passando pelo `TryFrom`, que é o único caminho de construção.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantContextParts {
    pub organization_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub region: Option<String>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    #[serde(default)]
    pub settings: TenantSettings,
}

impl TenantContextParts {
    /// Junta a sessão com a organização encontrada e as permissões do cargo.
    pub fn from_lookup(
        session: &Session,
        organization: Organization,
        permissions: impl IntoIterator<Item = String>,
    ) -> Result<Self, TenantContextError> {
        if organization.id != session.organization_id {
            return Err(TenantContextError::OrganizationMismatch {
                session: session.organization_id,
                found: organization.id,
            });
        }

        // Sem nome próprio configurado, o lar usa o nome da organização
        let mut settings = organization.settings.0;
        if settings.care_home_name.is_none() {
            settings.care_home_name = Some(organization.name);
        }

        Ok(Self {
            organization_id: Some(organization.id),
            tenant_id: organization.tenant_id,
            region: organization.region,
            timezone: organization.timezone,
            features: organization.features.into_iter().collect(),
            permissions: permissions.into_iter().collect(),
            settings,
        })
    }
}

// ---
// 3. TenantContext (congelado)
// ---
/// Atributos do tenant para a requisição atual.
///
/// Campos privados: depois de construído ninguém altera. Para mudar,
/// monta-se outro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "TenantContextParts")]
pub struct TenantContext {
    organization_id: Uuid,
    tenant_id: Uuid,
    region: Region,
    #[schema(example = "Europe/London")]
    timezone: String,
    #[schema(value_type = Vec<String>)]
    features: BTreeSet<String>,
    #[schema(value_type = Vec<String>)]
    permissions: BTreeSet<String>,
    settings: TenantSettings,
}

impl TryFrom<TenantContextParts> for TenantContext {
    type Error = TenantContextError;

    fn try_from(parts: TenantContextParts) -> Result<Self, Self::Error> {
        let organization_id = parts
            .organization_id
            .filter(|id| !id.is_nil())
            .ok_or(TenantContextError::MissingField("organizationId"))?;
        let tenant_id = parts
            .tenant_id
            .filter(|id| !id.is_nil())
            .ok_or(TenantContextError::MissingField("tenantId"))?;

        let region = parts
            .region
            .filter(|r| !r.trim().is_empty())
            .ok_or(TenantContextError::MissingField("region"))?;
        let region = region
            .parse::<Region>()
            .map_err(|e| TenantContextError::UnknownRegion(e.0))?;

        let timezone = parts
            .timezone
            .filter(|tz| !tz.trim().is_empty())
            .ok_or(TenantContextError::MissingField("timezone"))?;
        if timezone.parse::<Tz>().is_err() {
            return Err(TenantContextError::InvalidTimezone(timezone));
        }

        Ok(Self {
            organization_id,
            tenant_id,
            region,
            timezone,
            features: parts.features,
            permissions: parts.permissions,
            settings: parts.settings,
        })
    }
}

impl TenantContext {
    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn settings(&self) -> &TenantSettings {
        &self.settings
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
