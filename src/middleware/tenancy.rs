// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::Session,
        tenancy::{TenantContext, TenantContextError},
    },
};

/// Monta o `TenantContext` depois do portão de sessão.
///
/// Precisa rodar por dentro do `session_gate`. Qualquer falha aqui é
/// resolvida na borda (redirect), nunca chega aos handlers.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = request
        .extensions()
        .get::<Session>()
        .cloned()
        .ok_or(AppError::Unauthenticated)?;

    let context = app_state
        .tenant_service
        .build_context(&session)
        .await
        .map_err(|e| match e {
            AppError::TenantContext(_) => e,
            other => {
                tracing::error!("tenant lookup failed for {}: {:?}", session.organization_id, other);
                AppError::TenantContext(TenantContextError::LookupUnavailable)
            }
        })?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
