// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    middleware::session::SESSION_COOKIE,
    models::{
        region::{Region, UnknownRegion},
        tenancy::TenantContextError,
    },
};

/// Destino fixo para quem não está autenticado.
pub const SIGN_IN_PATH: &str = "/auth/signin";

/// Marca no sign-in de que a sessão é válida mas o tenant não pôde ser montado.
/// As páginas públicas não devolvem essa requisição para o dashboard.
pub const TENANT_ERROR_QUERY: &str = "error=tenant";

#[derive(Debug, Error)]
pub enum AppError {
    /// Sem sessão válida. Nunca vira erro na tela: sempre redireciona.
    #[error("authentication required")]
    Unauthenticated,

    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    #[error("missing permission '{0}'")]
    Forbidden(String),

    #[error("feature '{0}' is not enabled for this organisation")]
    FeatureDisabled(String),

    #[error(transparent)]
    UnknownRegion(#[from] UnknownRegion),

    /// Tabela de variantes sem entrada para a região. É erro de configuração.
    #[error("no variant registered for region {0}")]
    MissingVariant(Region),

    #[error("tenant context could not be built: {0}")]
    TenantContext(#[from] TenantContextError),

    #[error("database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

/// Corpo padrão das respostas de erro.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Nome do campo como o cliente enviou (`sort_code` -> `sortCode`).
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !name.is_empty();
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(wire_name(&field), messages);
    }
    // erros de itens aninhados (ex.: transactions[3].amount)
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::List(items) = kind {
            for (index, nested) in items {
                for (inner, inner_errors) in nested.field_errors() {
                    let messages = inner_errors
                        .iter()
                        .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                        .collect();
                    details.insert(
                        format!("{}[{}].{}", wire_name(field), index, wire_name(&inner)),
                        messages,
                    );
                }
            }
        }
    }
    serde_json::to_value(details).unwrap_or(Value::Null)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let api_error = match self {
            AppError::Unauthenticated => {
                tracing::debug!("no session, redirecting to {}", SIGN_IN_PATH);
                return Redirect::to(SIGN_IN_PATH).into_response();
            }
            AppError::TenantContext(ref e) => {
                tracing::warn!("tenant context rejected: {}", e);
                // Apaga o cookie: com ele, o sign-in mandaria de volta ao dashboard
                let mut expired = Cookie::build((SESSION_COOKIE, "")).path("/").build();
                expired.make_removal();
                let target = format!("{}?{}", SIGN_IN_PATH, TENANT_ERROR_QUERY);
                return (CookieJar::new().add(expired), Redirect::to(&target)).into_response();
            }
            AppError::ValidationError(ref errors) => ApiError {
                status: StatusCode::BAD_REQUEST,
                error: "One or more fields are invalid.".into(),
                details: Some(validation_details(errors)),
            },
            AppError::InvalidPayload(ref msg) => ApiError::new(StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Forbidden(_) | AppError::FeatureDisabled(_) => {
                ApiError::new(StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::UnknownRegion(_) => {
                ApiError::new(StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::MissingVariant(region) => {
                tracing::error!("configuration error: no variant registered for {}", region);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Service misconfigured.")
            }

            // Todo o resto (banco, bcrypt, jwt, anyhow) vira 500 e é logado aqui, uma vez.
            ref e => {
                tracing::error!("internal server error: {:?}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        api_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use validator::Validate;

    use crate::models::finance::BankImportPayload;

    #[test]
    fn unauthenticated_redirects_to_sign_in() {
        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], SIGN_IN_PATH);
    }

    #[test]
    fn tenant_failures_redirect_to_marked_sign_in_and_drop_the_cookie() {
        let err = AppError::from(TenantContextError::MissingField("tenantId"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/auth/signin?error=tenant");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session=;"), "{cookie}");
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
    }

    #[test]
    fn validation_and_internal_errors_are_distinguished() {
        let validation = AppError::ValidationError(validator::ValidationErrors::new());
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let internal = AppError::InternalServerError(anyhow::anyhow!("disk on fire"));
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_details_use_wire_field_names() {
        let payload: BankImportPayload = serde_json::from_value(serde_json::json!({
            "accountName": "Operating account",
            "sortCode": "12-34",
            "accountNumber": "12345678",
            "statementDate": "2025-02-28",
            "transactions": [
                { "date": "2025-02-01", "description": "Fee", "amount": 0.001 }
            ]
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();

        let details = validation_details(&errors);
        assert!(details["sortCode"].is_array(), "{details}");
        assert!(details["transactions[0].amount"].is_array(), "{details}");
        assert!(details.get("sort_code").is_none());
    }

    #[test]
    fn snake_case_fields_become_camel_case() {
        assert_eq!(wire_name("sort_code"), "sortCode");
        assert_eq!(wire_name("statement_date"), "statementDate");
        assert_eq!(wire_name("amount"), "amount");
    }

    #[test]
    fn missing_variant_is_a_server_error() {
        let response = AppError::MissingVariant(Region::Ireland).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
