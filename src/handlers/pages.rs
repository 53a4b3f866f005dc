// src/handlers/pages.rs

use axum::{
    extract::{Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::error::{AppError, SIGN_IN_PATH},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{FeatBedManagement, PermBedsRead, RequireFeature, RequirePermission},
        session::DASHBOARD_PATH,
    },
    models::{
        auth::{Session, SignInPage},
        locale::LocaleConfig,
        navigation::NavEntry,
        region::Region,
        tenancy::TenantContext,
    },
    services::{navigation, region_resolver},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub product: &'static str,
    pub sign_in: &'static str,
    pub locale: LocaleConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub organization_id: Uuid,
    pub region: Region,
    pub role: String,
    pub locale: LocaleConfig,
    pub navigation: Vec<NavEntry>,
}

/// Troca o primeiro segmento do caminho pela chave da região do tenant.
fn path_in_region(path: &str, region: Region) -> String {
    let rest = path
        .trim_start_matches('/')
        .split_once('/')
        .map_or("", |(_, rest)| rest);
    if rest.is_empty() {
        format!("/{}", region.key())
    } else {
        format!("/{}/{}", region.key(), rest)
    }
}

/// Região do caminho, conferida contra a do tenant.
///
/// `Err(Redirect)` quando o usuário abriu a URL de outra região.
fn region_for_page(uri: &Uri, ctx: &TenantContext) -> Result<Result<Region, Redirect>, AppError> {
    let region = region_resolver::resolve_region(uri.path())?;
    if region != ctx.region() {
        tracing::debug!("{} requested {}, redirecting to own region", ctx.organization_id(), region);
        return Ok(Err(Redirect::to(&path_in_region(uri.path(), ctx.region()))));
    }
    Ok(Ok(region))
}

// GET /
pub async fn landing(locale: Locale) -> Json<LandingPage> {
    Json(LandingPage {
        product: "Care home management",
        sign_in: SIGN_IN_PATH,
        locale: locale.config_for(Region::UkEngland),
    })
}

#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    pub error: Option<String>,
}

// GET /auth/signin
pub async fn sign_in(Query(query): Query<SignInQuery>) -> Json<SignInPage> {
    let message = match query.error.as_deref() {
        Some("tenant") => "Your organisation account could not be loaded. Please sign in again or contact your administrator.",
        _ => "Sign in with your organisation account to continue.",
    };
    Json(SignInPage {
        message: message.into(),
        after_sign_in: DASHBOARD_PATH.into(),
    })
}

// GET /dashboard -> /{região}/dashboard
pub async fn dashboard_root(ctx: TenantContext) -> Redirect {
    Redirect::to(&format!("/{}/dashboard", ctx.region().key()))
}

// GET /{region}/dashboard
pub async fn regional_dashboard(
    uri: Uri,
    locale: Locale,
    session: Session,
    ctx: TenantContext,
) -> Result<Response, AppError> {
    let region = match region_for_page(&uri, &ctx)? {
        Ok(region) => region,
        Err(redirect) => return Ok(redirect.into_response()),
    };

    Ok(Json(DashboardPage {
        organization_id: ctx.organization_id(),
        region,
        role: session.role,
        locale: locale.config_for(region),
        navigation: navigation::resolve(&ctx, &navigation::menu(), uri.path()),
    })
    .into_response())
}

// GET /{region}/bed-management
pub async fn regional_bed_management(
    State(app_state): State<AppState>,
    uri: Uri,
    ctx: TenantContext,
    _perm: RequirePermission<PermBedsRead>,
    _feature: RequireFeature<FeatBedManagement>,
) -> Result<Response, AppError> {
    if let Err(redirect) = region_for_page(&uri, &ctx)? {
        return Ok(redirect.into_response());
    }

    // A variante vem da região resolvida a partir do caminho
    let (_, dashboard) = app_state.bed_dashboards.select_for_path(uri.path())?;
    let view = app_state.bed_service.overview(&ctx, &**dashboard).await;

    Ok(Json(view).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_the_region_segment() {
        assert_eq!(path_in_region("/wales/dashboard", Region::Ireland), "/ireland/dashboard");
        assert_eq!(
            path_in_region("/england/bed-management/status", Region::UkNorthernIreland),
            "/northern-ireland/bed-management/status"
        );
        assert_eq!(path_in_region("/scotland", Region::UkWales), "/wales");
    }
}
