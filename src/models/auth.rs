// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor de identidade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,    // Subject (ID do usuário)
    pub org: Uuid,    // Organização a que a sessão pertence
    pub role: String, // Cargo dentro da organização
    pub email: String,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

/// Sessão autenticada da requisição atual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    #[schema(example = "manager")]
    pub role: String,
    #[schema(example = "manager@rosewood.example")]
    pub email: String,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            organization_id: claims.org,
            role: claims.role,
            email: claims.email,
        }
    }
}

// Resposta pública de /auth/signin
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInPage {
    #[schema(example = "Sign in with your organisation account to continue.")]
    pub message: String,
    #[schema(example = "/dashboard")]
    pub after_sign_in: String,
}
