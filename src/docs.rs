// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Tenancy ---
        handlers::tenancy::get_context,
        handlers::tenancy::get_locale,

        // --- Navigation ---
        handlers::navigation::get_navigation,

        // --- Bed management ---
        handlers::bed_management::get_overview,
        handlers::bed_management::get_status,
        handlers::bed_management::get_metrics,
        handlers::bed_management::get_maintenance,

        // --- Accounting ---
        handlers::accounting::bank_import,

        // --- Verification ---
        handlers::verification::verify_pin,
        handlers::verification::verify_barcode,
    ),
    components(
        schemas(
            // --- Tenancy ---
            models::region::Region,
            models::locale::LocaleConfig,
            models::settings::TenantSettings,
            models::tenancy::TenantContext,
            models::auth::Session,

            // --- Navigation ---
            models::navigation::NavEntry,
            models::navigation::SubNavEntry,

            // --- Beds ---
            models::beds::BedState,
            models::beds::BedStatus,
            models::beds::MaintenanceState,
            models::beds::MaintenanceStatus,
            models::beds::OccupancyMetrics,
            services::bed_dashboards::Regulator,
            services::bed_dashboards::BedDashboardView,

            // --- Accounting ---
            models::finance::BankTransactionPayload,
            models::finance::BankImportPayload,
            models::finance::BankImport,

            // --- Verification ---
            models::verification::VerificationContext,
            models::verification::PinVerification,
            models::verification::BarcodeData,
            models::verification::VerifiedStaff,
            models::verification::VerificationResult,

            // --- Audit ---
            models::audit::AuditLogAction,
            models::audit::AuditLogStatus,
            models::audit::AuditLogActorType,
            models::audit::AuditLogEntry,
        )
    ),
    tags(
        (name = "Tenancy", description = "Contexto do tenant da sessão"),
        (name = "Navigation", description = "Menu lateral filtrado por permissão"),
        (name = "Bed management", description = "Leitos, ocupação e manutenção"),
        (name = "Accounting", description = "Importação de extratos bancários"),
        (name = "Verification", description = "Confirmação de equipe por PIN ou crachá")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
