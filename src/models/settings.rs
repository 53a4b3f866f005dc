// src/models/settings.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Configurações conhecidas de um tenant.
///
/// Chaves reconhecidas têm campo próprio; o que o tenant definir por conta
/// própria fica em `extra` e não tem efeito no servidor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantSettings {
    #[schema(example = "Rosewood House")]
    pub care_home_name: Option<String>,

    /// Número de leitos registrado junto ao regulador.
    #[schema(example = 42)]
    pub bed_capacity: Option<u32>,

    /// Administração de medicamento exige testemunha verificada.
    pub medication_witness_required: bool,

    /// Drogas controladas exigem dupla assinatura (duas pessoas distintas).
    /// Ligado a menos que o tenant desligue.
    pub controlled_drug_double_signoff: bool,

    #[schema(example = "manager@rosewood.example")]
    pub notification_email: Option<String>,

    #[schema(value_type = Object)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            care_home_name: None,
            bed_capacity: None,
            medication_witness_required: false,
            controlled_drug_double_signoff: true,
            notification_email: None,
            extra: BTreeMap::new(),
        }
    }
}
