// src/handlers/accounting.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{FeatAccounting, PermBillingWrite, RequireFeature, RequirePermission},
    models::{
        auth::Session,
        finance::{BankImport, BankImportPayload},
        tenancy::TenantContext,
    },
};

// POST /api/accounting/bank-import
#[utoipa::path(
    post,
    path = "/api/accounting/bank-import",
    tag = "Accounting",
    request_body = BankImportPayload,
    responses(
        (status = 201, description = "Extrato importado", body = BankImport),
        (status = 400, description = "Payload inválido (detalhes por campo)"),
        (status = 403, description = "Sem permissão ou feature desativada"),
        (status = 500, description = "Falha ao gravar")
    ),
    security(("session_jwt" = []))
)]
pub async fn bank_import(
    State(app_state): State<AppState>,
    session: Session,
    ctx: TenantContext,
    _perm: RequirePermission<PermBillingWrite>,
    _feature: RequireFeature<FeatAccounting>,
    WithRejection(Json(payload), _): WithRejection<Json<BankImportPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // Validação antes de qualquer escrita
    payload.validate()?;

    let import = app_state
        .finance_service
        .import_bank_statement(&ctx, &session, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(import)))
}
