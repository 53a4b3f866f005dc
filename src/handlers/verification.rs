// src/handlers/verification.rs

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermMedicationAdminister, RequirePermission},
    models::{
        auth::Session,
        tenancy::TenantContext,
        verification::{BarcodeData, PinVerification, VerificationResult},
    },
};

// POST /api/verification/pin
#[utoipa::path(
    post,
    path = "/api/verification/pin",
    tag = "Verification",
    request_body = PinVerification,
    responses(
        (status = 200, description = "Resultado da verificação (sucesso ou recusa)", body = VerificationResult),
        (status = 400, description = "Payload inválido")
    ),
    security(("session_jwt" = []))
)]
pub async fn verify_pin(
    State(app_state): State<AppState>,
    session: Session,
    ctx: TenantContext,
    _perm: RequirePermission<PermMedicationAdminister>,
    WithRejection(Json(payload), _): WithRejection<Json<PinVerification>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = app_state
        .verification_service
        .verify_pin(&ctx, &session, &payload)
        .await?;

    Ok(Json(result))
}

// POST /api/verification/barcode
#[utoipa::path(
    post,
    path = "/api/verification/barcode",
    tag = "Verification",
    request_body = BarcodeData,
    responses(
        (status = 200, description = "Resultado da verificação (sucesso ou recusa)", body = VerificationResult),
        (status = 400, description = "Payload inválido")
    ),
    security(("session_jwt" = []))
)]
pub async fn verify_barcode(
    State(app_state): State<AppState>,
    session: Session,
    ctx: TenantContext,
    _perm: RequirePermission<PermMedicationAdminister>,
    WithRejection(Json(payload), _): WithRejection<Json<BarcodeData>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = app_state
        .verification_service
        .verify_barcode(&ctx, &session, &payload)
        .await?;

    Ok(Json(result))
}
