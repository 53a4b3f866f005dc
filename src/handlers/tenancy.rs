// src/handlers/tenancy.rs

use axum::Json;

use crate::{
    middleware::i18n::Locale,
    models::{locale::LocaleConfig, tenancy::TenantContext},
};

// GET /api/tenant/context
#[utoipa::path(
    get,
    path = "/api/tenant/context",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Contexto do tenant da sessão", body = TenantContext),
        (status = 303, description = "Sem sessão ou tenant inválido: redireciona para o sign-in")
    ),
    security(("session_jwt" = []))
)]
pub async fn get_context(ctx: TenantContext) -> Json<TenantContext> {
    Json(ctx)
}

// GET /api/tenant/locale
#[utoipa::path(
    get,
    path = "/api/tenant/locale",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Idioma, moeda e fuso para a região do tenant", body = LocaleConfig)
    ),
    security(("session_jwt" = []))
)]
pub async fn get_locale(ctx: TenantContext, locale: Locale) -> Json<LocaleConfig> {
    let mut config = locale.config_for(ctx.region());
    // o fuso do tenant prevalece sobre o padrão da região
    config.timezone = ctx.timezone().to_string();
    Json(config)
}
