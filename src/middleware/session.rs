// src/middleware/session.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};

use crate::{
    common::error::{AppError, TENANT_ERROR_QUERY},
    config::AppState,
    models::auth::Session,
    services::auth::AuthService,
};

/// Cookie com o token quando o navegador não manda `Authorization`.
pub const SESSION_COOKIE: &str = "session";

/// Para onde vai quem já está autenticado e abre uma página pública.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Lê o token (cabeçalho primeiro, depois cookie) e valida.
/// Qualquer falha é tratada como "sem sessão".
pub fn session_from_headers(auth_service: &AuthService, headers: &HeaderMap) -> Option<Session> {
    let token = headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .or_else(|| {
            CookieJar::from_headers(headers)
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })?;

    auth_service.validate_token(&token).ok()
}

// O "portão": sem sessão, redireciona e não renderiza nada protegido.
pub async fn session_gate(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_headers(&app_state.auth_service, request.headers())
        .ok_or(AppError::Unauthenticated)?;

    tracing::debug!(user_id = %session.user_id, "session accepted");

    // Insere a sessão nos "extensions" da requisição
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Veio de uma falha na montagem do tenant (`?error=tenant`).
fn is_tenant_failure(request: &Request) -> bool {
    request
        .uri()
        .query()
        .is_some_and(|query| query.split('&').any(|pair| pair == TENANT_ERROR_QUERY))
}

/// Páginas públicas (landing, sign-in): quem já tem sessão vai para o dashboard.
///
/// Exceto quando o próprio dashboard mandou para cá por falha de tenant;
/// devolver criaria um ciclo de redirects.
pub async fn redirect_if_authenticated(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_tenant_failure(&request)
        && session_from_headers(&app_state.auth_service, request.headers()).is_some()
    {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }
    next.run(request).await
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
