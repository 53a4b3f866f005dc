// src/handlers/bed_management.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{FeatBedManagement, PermBedsRead, RequireFeature, RequirePermission},
    models::{
        beds::{BedStatus, MaintenanceStatus, OccupancyMetrics},
        tenancy::TenantContext,
    },
    services::bed_dashboards::BedDashboardView,
};

type BedAccess = (RequirePermission<PermBedsRead>, RequireFeature<FeatBedManagement>);

// GET /api/bed-management/overview
#[utoipa::path(
    get,
    path = "/api/bed-management/overview",
    tag = "Bed management",
    responses(
        (status = 200, description = "Painel de leitos da região do tenant", body = BedDashboardView),
        (status = 303, description = "Sem sessão: redireciona para o sign-in"),
        (status = 403, description = "Sem permissão ou feature desativada")
    ),
    security(("session_jwt" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    _access: BedAccess,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = app_state.bed_dashboards.select(ctx.region());
    let view = app_state.bed_service.overview(&ctx, &**dashboard).await;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/bed-management/status
#[utoipa::path(
    get,
    path = "/api/bed-management/status",
    tag = "Bed management",
    responses(
        (status = 200, description = "Situação de cada leito", body = Vec<BedStatus>),
        (status = 403, description = "Sem permissão ou feature desativada")
    ),
    security(("session_jwt" = []))
)]
pub async fn get_status(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    _access: BedAccess,
) -> Result<impl IntoResponse, AppError> {
    let beds = app_state.bed_service.status(&ctx).await?;
    Ok((StatusCode::OK, Json(beds)))
}

// GET /api/bed-management/metrics
#[utoipa::path(
    get,
    path = "/api/bed-management/metrics",
    tag = "Bed management",
    responses(
        (status = 200, description = "Ocupação calculada a partir dos leitos", body = OccupancyMetrics),
        (status = 403, description = "Sem permissão ou feature desativada")
    ),
    security(("session_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    _access: BedAccess,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state.bed_service.metrics(&ctx).await?;
    Ok((StatusCode::OK, Json(metrics)))
}

// GET /api/bed-management/maintenance
#[utoipa::path(
    get,
    path = "/api/bed-management/maintenance",
    tag = "Bed management",
    responses(
        (status = 200, description = "Manutenções abertas ou recentes", body = Vec<MaintenanceStatus>),
        (status = 403, description = "Sem permissão ou feature desativada")
    ),
    security(("session_jwt" = []))
)]
pub async fn get_maintenance(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    _access: BedAccess,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.bed_service.maintenance(&ctx).await?;
    Ok((StatusCode::OK, Json(items)))
}
