// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, models::tenancy::TenantContext};

/// 1. O trait que define o que é uma permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// Mesma ideia para feature flags do tenant
pub trait FeatureDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 2. Os extratores (guardiões)
pub struct RequirePermission<T>(pub PhantomData<T>);

pub struct RequireFeature<F>(pub PhantomData<F>);

fn tenant_context(parts: &Parts) -> Result<&TenantContext, AppError> {
    parts
        .extensions
        .get::<TenantContext>()
        .ok_or(AppError::Unauthenticated)
}

// 3. Verificação contra o contexto já montado (sem ida ao banco)
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let required = T::slug();
        if !tenant_context(parts)?.has_permission(required) {
            return Err(AppError::Forbidden(required.to_string()));
        }
        Ok(RequirePermission(PhantomData))
    }
}

impl<F, S> FromRequestParts<S> for RequireFeature<F>
where
    F: FeatureDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let required = F::name();
        if !tenant_context(parts)?.has_feature(required) {
            return Err(AppError::FeatureDisabled(required.to_string()));
        }
        Ok(RequireFeature(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermBedsRead;
impl PermissionDef for PermBedsRead {
    fn slug() -> &'static str {
        "beds:read"
    }
}

pub struct PermBillingWrite;
impl PermissionDef for PermBillingWrite {
    fn slug() -> &'static str {
        "billing:write"
    }
}

pub struct PermMedicationAdminister;
impl PermissionDef for PermMedicationAdminister {
    fn slug() -> &'static str {
        "medication:administer"
    }
}

// ---
// FEATURES
// ---

pub struct FeatBedManagement;
impl FeatureDef for FeatBedManagement {
    fn name() -> &'static str {
        "bed-management"
    }
}

pub struct FeatAccounting;
impl FeatureDef for FeatAccounting {
    fn name() -> &'static str {
        "accounting"
    }
}
