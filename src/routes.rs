// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{
        session::{redirect_if_authenticated, session_gate},
        tenancy::tenant_guard,
    },
};

pub fn build_router(app_state: AppState) -> Router {
    // Páginas públicas: quem já tem sessão vai direto para o dashboard
    let public_routes = Router::new()
        .route("/", get(handlers::pages::landing))
        .route("/auth/signin", get(handlers::pages::sign_in))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            redirect_if_authenticated,
        ));

    let page_routes = Router::new()
        .route("/dashboard", get(handlers::pages::dashboard_root))
        .route("/{region}/dashboard", get(handlers::pages::regional_dashboard))
        .route("/{region}/bed-management", get(handlers::pages::regional_bed_management));

    let api_routes = Router::new()
        .route("/tenant/context", get(handlers::tenancy::get_context))
        .route("/tenant/locale", get(handlers::tenancy::get_locale))
        .route("/navigation", get(handlers::navigation::get_navigation))
        .route("/bed-management/overview", get(handlers::bed_management::get_overview))
        .route("/bed-management/status", get(handlers::bed_management::get_status))
        .route("/bed-management/metrics", get(handlers::bed_management::get_metrics))
        .route("/bed-management/maintenance", get(handlers::bed_management::get_maintenance))
        .route("/accounting/bank-import", post(handlers::accounting::bank_import))
        .route("/verification/pin", post(handlers::verification::verify_pin))
        .route("/verification/barcode", post(handlers::verification::verify_barcode));

    // O último layer é o de fora: primeiro a sessão, depois o tenant
    let protected_routes = Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_gate,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use sqlx::{postgres::PgPoolOptions, types::Json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        config::AppConfig,
        models::{auth::Session, settings::TenantSettings, tenancy::Organization},
        services::{auth::AuthService, tenancy_service::memory::MemoryDirectory},
    };

    const SECRET: &str = "test-secret-with-at-least-32-chars!!";

    struct TestApp {
        router: Router,
        auth: AuthService,
        org_id: Uuid,
    }

    impl TestApp {
        fn token(&self, role: &str) -> String {
            let session = Session {
                user_id: Uuid::new_v4(),
                organization_id: self.org_id,
                role: role.into(),
                email: format!("{role}@bryn.example"),
            };
            self.auth.create_token(&session, chrono::Duration::hours(1)).unwrap()
        }

        async fn get(&self, uri: &str, token: Option<&str>) -> axum::response::Response {
            let mut request = Request::builder().uri(uri);
            if let Some(token) = token {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            self.router
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap()
        }
    }

    fn app_with(directory_fails: bool) -> TestApp {
        let org_id = Uuid::new_v4();
        let mut directory = MemoryDirectory {
            fail: directory_fails,
            ..Default::default()
        };
        directory.organizations.insert(
            org_id,
            Organization {
                id: org_id,
                tenant_id: Some(Uuid::new_v4()),
                name: "Bryn Awel".into(),
                region: Some("UK_WALES".into()),
                timezone: Some("Europe/London".into()),
                features: vec!["bed-management".into(), "accounting".into()],
                settings: Json(TenantSettings::default()),
            },
        );
        directory.permissions.insert(
            (org_id, "manager".into()),
            vec!["beds:read".into(), "billing:read".into(), "billing:write".into()],
        );
        directory
            .permissions
            .insert((org_id, "carer".into()), vec!["residents:read".into()]);

        let config = AppConfig {
            database_url: "postgres://127.0.0.1:1/carehome_test".into(),
            auth_secret: SECRET.into(),
            bind_addr: "127.0.0.1:0".into(),
            db_max_connections: 1,
        };
        // Porta fechada: toda consulta falha rápido e vira estado de erro
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy(&config.database_url)
            .unwrap();
        let state = AppState::with_directory(config, pool, Arc::new(directory)).unwrap();

        TestApp {
            router: build_router(state),
            auth: AuthService::new(SECRET.into()),
            org_id,
        }
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app_with(false);
        let response = app.get("/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_without_session_redirects_to_sign_in() {
        let app = app_with(false);
        for uri in ["/dashboard", "/wales/dashboard", "/api/tenant/context"] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&response), "/auth/signin");
        }
    }

    #[tokio::test]
    async fn expired_token_is_treated_as_no_session() {
        let app = app_with(false);
        let session = Session {
            user_id: Uuid::new_v4(),
            organization_id: app.org_id,
            role: "manager".into(),
            email: "manager@bryn.example".into(),
        };
        let token = app
            .auth
            .create_token(&session, chrono::Duration::hours(-2))
            .unwrap();

        let response = app.get("/api/tenant/context", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/signin");
    }

    #[tokio::test]
    async fn valid_session_gets_tenant_context() {
        let app = app_with(false);
        let token = app.token("manager");

        let response = app.get("/api/tenant/context", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["organizationId"], json!(app.org_id));
        assert_eq!(body["region"], "UK_WALES");
        assert_eq!(body["timezone"], "Europe/London");
    }

    #[tokio::test]
    async fn session_cookie_is_accepted() {
        let app = app_with(false);
        let token = app.token("manager");
        let request = Request::builder()
            .uri("/api/tenant/context")
            .header(header::COOKIE, format!("session={token}"))
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_pages_send_signed_in_users_to_dashboard() {
        let app = app_with(false);
        let token = app.token("carer");

        for uri in ["/", "/auth/signin"] {
            let anonymous = app.get(uri, None).await;
            assert_eq!(anonymous.status(), StatusCode::OK, "{uri}");

            let signed_in = app.get(uri, Some(&token)).await;
            assert_eq!(signed_in.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&signed_in), "/dashboard");
        }
    }

    #[tokio::test]
    async fn dashboard_root_goes_to_tenant_region() {
        let app = app_with(false);
        let response = app.get("/dashboard", Some(&app.token("carer"))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/wales/dashboard");
    }

    #[tokio::test]
    async fn regional_dashboard_renders_for_own_region() {
        let app = app_with(false);
        let response = app.get("/wales/dashboard", Some(&app.token("carer"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["region"], "UK_WALES");
        assert_eq!(body["locale"]["currency"], "GBP");
        let names: Vec<&str> = body["navigation"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|item| item["name"].as_str())
            .collect();
        assert_eq!(names, ["Dashboard", "Residents"]);
    }

    #[tokio::test]
    async fn other_region_url_redirects_to_own_region() {
        let app = app_with(false);
        let response = app.get("/england/dashboard", Some(&app.token("carer"))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/wales/dashboard");
    }

    #[tokio::test]
    async fn unknown_region_is_not_found() {
        let app = app_with(false);
        let response = app.get("/atlantis/dashboard", Some(&app.token("carer"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_permission_is_forbidden() {
        let app = app_with(false);
        let response = app
            .get("/api/bed-management/status", Some(&app.token("carer")))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn tenant_lookup_failure_redirects_to_sign_in() {
        let app = app_with(true);
        let response = app.get("/api/tenant/context", Some(&app.token("manager"))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/signin?error=tenant");
    }

    #[tokio::test]
    async fn tenant_failure_settles_on_the_sign_in_page() {
        let app = app_with(true);
        let token = app.token("manager");

        // Segue os redirects como um navegador, com a sessão ainda válida
        let mut uri = "/dashboard".to_string();
        let mut hops = 0;
        let response = loop {
            let response = app.get(&uri, Some(&token)).await;
            if response.status() != StatusCode::SEE_OTHER {
                break response;
            }
            hops += 1;
            assert!(hops <= 5, "redirect loop, last hop to {uri}");

            if location(&response).ends_with("error=tenant") {
                let cookie = response
                    .headers()
                    .get(header::SET_COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                assert!(cookie.starts_with("session=;"), "{cookie}");
            }
            uri = location(&response).to_string();
        };

        assert_eq!(hops, 1);
        assert_eq!(uri, "/auth/signin?error=tenant");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("could not be loaded"));
    }

    #[tokio::test]
    async fn bed_management_page_renders_with_an_unreachable_database() {
        let app = app_with(false);
        let response = app
            .get("/wales/bed-management", Some(&app.token("manager")))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["region"], "UK_WALES");
        assert_eq!(body["regulator"]["shortName"], "CIW");
        assert_eq!(body["metrics"]["state"], "error");
        assert_eq!(body["beds"]["state"], "error");
    }

    #[tokio::test]
    async fn bed_overview_reports_error_states_instead_of_failing() {
        let app = app_with(false);
        let response = app
            .get("/api/bed-management/overview", Some(&app.token("manager")))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["regulator"]["shortName"], "CIW");
        assert_eq!(body["metrics"]["state"], "error");
        assert_eq!(body["maintenance"]["state"], "error");
    }

    #[tokio::test]
    async fn bed_management_page_needs_the_permission() {
        let app = app_with(false);
        let response = app
            .get("/wales/bed-management", Some(&app.token("carer")))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn navigation_marks_the_active_item() {
        let app = app_with(false);
        let response = app
            .get("/api/navigation?path=/wales/billing/bank-import", Some(&app.token("manager")))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let active: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["active"] == json!(true))
            .filter_map(|item| item["name"].as_str())
            .collect();
        assert_eq!(active, ["Billing"]);
    }

    #[tokio::test]
    async fn invalid_bank_import_is_rejected_before_writing() {
        let app = app_with(false);
        let payload = json!({
            "accountName": "Operating account",
            "sortCode": "12-34",
            "accountNumber": "12345678",
            "statementDate": "2025-02-28",
            "transactions": []
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/accounting/bank-import")
            .header(header::AUTHORIZATION, format!("Bearer {}", app.token("manager")))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert!(body["details"]["sortCode"].is_array());
    }

    #[tokio::test]
    async fn malformed_bank_import_body_is_a_bad_request() {
        let app = app_with(false);
        let request = Request::builder()
            .method("POST")
            .uri("/api/accounting/bank-import")
            .header(header::AUTHORIZATION, format!("Bearer {}", app.token("manager")))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
