// src/models/verification.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::settings::TenantSettings;

/// Em que situação a verificação está sendo feita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationContext {
    Witness,
    Administration,
    ControlledDrug,
}

impl VerificationContext {
    /// Se quem confirma tem de ser outra pessoa, conforme as regras do lar.
    pub fn requires_second_person(self, settings: &TenantSettings) -> bool {
        match self {
            VerificationContext::Witness => true,
            VerificationContext::Administration => settings.medication_witness_required,
            VerificationContext::ControlledDrug => settings.controlled_drug_double_signoff,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinVerification {
    pub staff_id: Uuid,
    #[validate(length(min = 4, max = 8, message = "PIN must have 4 to 8 digits."))]
    #[schema(example = "4821")]
    pub pin: String,
    pub context: VerificationContext,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeData {
    #[validate(length(min = 4, max = 64, message = "Barcode is required."))]
    #[schema(example = "STF-000123")]
    pub barcode: String,
    pub context: VerificationContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedStaff {
    pub id: Uuid,
    #[schema(example = "Aled Jones")]
    pub name: String,
    #[schema(example = "senior-carer")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff: Option<VerifiedStaff>,
}

impl VerificationResult {
    pub fn verified(staff: VerifiedStaff) -> Self {
        Self {
            success: true,
            message: None,
            staff: Some(staff),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            staff: None,
        }
    }
}

// Linha da tabela `staff_credentials`
#[derive(Debug, Clone, FromRow)]
pub struct StaffCredential {
    pub staff_id: Uuid,
    pub organization_id: Uuid,
    pub display_name: String,
    pub role: String,
    pub pin_hash: String,
    pub controlled_drug_authority: bool,
    pub is_active: bool,
}

impl From<&StaffCredential> for VerifiedStaff {
    fn from(c: &StaffCredential) -> Self {
        Self {
            id: c.staff_id,
            name: c.display_name.clone(),
            role: c.role.clone(),
        }
    }
}
