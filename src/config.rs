// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::{
    db::{AuditRepository, BedRepository, FinanceRepository, RbacRepository, StaffRepository, TenantRepository},
    services::{
        auth::AuthService,
        bed_dashboards::{self, BedDashboards},
        bed_service::BedService,
        finance_service::FinanceService,
        tenancy_service::{OrganizationDirectory, PgOrganizationDirectory, TenantService},
        verification_service::VerificationService,
    },
};

/// Tamanho mínimo do segredo de sessão.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("AUTH_SECRET must be at least 32 characters (got {0})")]
    SecretTooShort(usize),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Configuração lida uma única vez na subida do processo.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub auth_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Separado de `from_env` para poder testar sem mexer no ambiente do processo.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let auth_secret = lookup("AUTH_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("AUTH_SECRET"))?;
        let secret_len = auth_secret.chars().count();
        if secret_len < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(secret_len));
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: raw,
            })?,
            None => 5,
        };

        Ok(Self {
            database_url,
            auth_secret,
            bind_addr,
            db_max_connections,
        })
    }
}

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub bed_service: BedService,
    pub finance_service: FinanceService,
    pub verification_service: VerificationService,
    pub bed_dashboards: Arc<BedDashboards>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Database connection established");

        let directory = PgOrganizationDirectory::new(
            TenantRepository::new(db_pool.clone()),
            RbacRepository::new(db_pool.clone()),
        );

        Self::with_directory(config, db_pool, Arc::new(directory))
    }

    /// Monta o gráfico de dependências em cima de um pool já criado.
    pub fn with_directory(
        config: AppConfig,
        db_pool: PgPool,
        directory: Arc<dyn OrganizationDirectory>,
    ) -> anyhow::Result<Self> {
        // Falha aqui se alguma região ficou sem painel: melhor não subir.
        let bed_dashboards = bed_dashboards::regional_dashboards()?;

        let audit_repo = AuditRepository::new(db_pool.clone());

        Ok(Self {
            auth_service: AuthService::new(config.auth_secret.clone()),
            tenant_service: TenantService::new(directory),
            bed_service: BedService::new(BedRepository::new(db_pool.clone())),
            finance_service: FinanceService::new(
                FinanceRepository::new(),
                audit_repo.clone(),
                db_pool.clone(),
            ),
            verification_service: VerificationService::new(
                StaffRepository::new(db_pool.clone()),
                audit_repo,
            ),
            bed_dashboards: Arc::new(bed_dashboards),
            config: Arc::new(config),
            db_pool,
        })
    }
}
