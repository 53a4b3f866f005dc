// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (mapeando os tipos do Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "audit_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditLogAction {
    Create,
    Read,
    Update,
    Delete,
    Import,
    Export,
    Login,
    Logout,
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "audit_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditLogStatus {
    Success,
    Failure,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "audit_actor_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditLogActorType {
    User,
    Staff,
    System,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: Uuid,
    #[schema(ignore)]
    pub organization_id: Uuid,
    pub actor_id: Uuid,
    pub actor_type: AuditLogActorType,
    pub action: AuditLogAction,
    pub status: AuditLogStatus,
    #[schema(example = "bank_import")]
    pub resource: String,
    pub resource_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub metadata: sqlx::types::Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Registro a ser gravado (sem id/data, que vêm do banco).
#[derive(Debug, Clone)]
pub struct NewAuditLogEntry {
    pub organization_id: Uuid,
    pub actor_id: Uuid,
    pub actor_type: AuditLogActorType,
    pub action: AuditLogAction,
    pub status: AuditLogStatus,
    pub resource: &'static str,
    pub resource_id: Option<Uuid>,
    pub metadata: serde_json::Value,
}
