// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Session},
};

/// Valida os tokens de sessão emitidos pelo provedor de identidade.
///
/// Não existe login aqui: o provedor externo autentica e assina; nós só
/// conferimos assinatura e validade.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("rejected session token: {}", e);
            AppError::Unauthenticated
        })?;

        Ok(token_data.claims.into())
    }

    #[cfg(test)]
    pub fn create_token(&self, session: &Session, ttl: chrono::Duration) -> Result<String, AppError> {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = chrono::Utc::now();
        let claims = Claims {
            sub: session.user_id,
            org: session.organization_id,
            role: session.role.clone(),
            email: session.email.clone(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
