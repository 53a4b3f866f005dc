// src/services/verification_service.rs

use bcrypt::verify;
use serde_json::json;

use crate::{
    common::error::AppError,
    db::{AuditRepository, StaffRepository},
    models::{
        audit::{AuditLogAction, AuditLogActorType, AuditLogStatus, NewAuditLogEntry},
        auth::Session,
        tenancy::TenantContext,
        verification::{
            BarcodeData, PinVerification, StaffCredential, VerificationContext, VerificationResult,
            VerifiedStaff,
        },
    },
};

#[derive(Clone)]
pub struct VerificationService {
    staff_repo: StaffRepository,
    audit_repo: AuditRepository,
}

/// Regras que não dependem de credencial (PIN/crachá).
///
/// Devolve a mensagem de recusa, ou `None` se a pessoa pode confirmar.
pub fn check_rules(
    ctx: &TenantContext,
    session: &Session,
    staff: &StaffCredential,
    context: VerificationContext,
) -> Option<&'static str> {
    if !staff.is_active {
        return Some("This staff account is inactive.");
    }
    if staff.organization_id != ctx.organization_id() {
        return Some("Staff member not found.");
    }

    if context.requires_second_person(ctx.settings()) && staff.staff_id == session.user_id {
        return Some("A different member of staff must confirm this.");
    }

    if context == VerificationContext::ControlledDrug && !staff.controlled_drug_authority {
        return Some("This member of staff cannot witness controlled drugs.");
    }

    None
}

impl VerificationService {
    pub fn new(staff_repo: StaffRepository, audit_repo: AuditRepository) -> Self {
        Self { staff_repo, audit_repo }
    }

    pub async fn verify_pin(
        &self,
        ctx: &TenantContext,
        session: &Session,
        request: &PinVerification,
    ) -> Result<VerificationResult, AppError> {
        if !request.pin.chars().all(|c| c.is_ascii_digit()) {
            return Ok(VerificationResult::rejected("PIN must contain digits only."));
        }

        let staff = self
            .staff_repo
            .find_by_staff_id(ctx.organization_id(), request.staff_id)
            .await?;

        let result = match staff {
            None => VerificationResult::rejected("Staff member not found."),
            Some(staff) => {
                // bcrypt é caro: roda fora do executor async
                let pin = request.pin.clone();
                let hash = staff.pin_hash.clone();
                let pin_ok = tokio::task::spawn_blocking(move || verify(&pin, &hash))
                    .await
                    .map_err(|e| anyhow::anyhow!("PIN verification task failed: {}", e))??;

                if !pin_ok {
                    VerificationResult::rejected("Incorrect PIN.")
                } else {
                    self.apply_rules(ctx, session, &staff, request.context)
                }
            }
        };

        self.audit(ctx, session, request.context, "pin", &result).await?;
        Ok(result)
    }

    pub async fn verify_barcode(
        &self,
        ctx: &TenantContext,
        session: &Session,
        request: &BarcodeData,
    ) -> Result<VerificationResult, AppError> {
        let staff = self
            .staff_repo
            .find_by_badge(ctx.organization_id(), request.barcode.trim())
            .await?;

        let result = match staff {
            None => VerificationResult::rejected("Badge not recognised."),
            Some(staff) => self.apply_rules(ctx, session, &staff, request.context),
        };

        self.audit(ctx, session, request.context, "barcode", &result).await?;
        Ok(result)
    }

    fn apply_rules(
        &self,
        ctx: &TenantContext,
        session: &Session,
        staff: &StaffCredential,
        context: VerificationContext,
    ) -> VerificationResult {
        match check_rules(ctx, session, staff, context) {
            Some(reason) => VerificationResult::rejected(reason),
            None => VerificationResult::verified(VerifiedStaff::from(staff)),
        }
    }

    async fn audit(
        &self,
        ctx: &TenantContext,
        session: &Session,
        context: VerificationContext,
        method: &str,
        result: &VerificationResult,
    ) -> Result<(), AppError> {
        let status = if result.success {
            AuditLogStatus::Success
        } else {
            AuditLogStatus::Failure
        };

        self.audit_repo
            .record(NewAuditLogEntry {
                organization_id: ctx.organization_id(),
                actor_id: session.user_id,
                actor_type: AuditLogActorType::User,
                action: AuditLogAction::Verify,
                status,
                resource: "staff_verification",
                resource_id: result.staff.as_ref().map(|s| s.id),
                metadata: json!({ "context": context, "method": method }),
            })
            .await?;

        Ok(())
    }
}
