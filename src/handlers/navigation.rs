// src/handlers/navigation.rs

use axum::{extract::Query, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    models::{navigation::NavEntry, tenancy::TenantContext},
    services::navigation,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// Caminho atual da tela; sem ele, o dashboard da região
    #[param(example = "/wales/bed-management/status")]
    pub path: Option<String>,
}

// GET /api/navigation
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "Navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Menu visível com o item ativo marcado", body = Vec<NavEntry>)
    ),
    security(("session_jwt" = []))
)]
pub async fn get_navigation(ctx: TenantContext, Query(query): Query<NavigationQuery>) -> Json<Vec<NavEntry>> {
    let path = query
        .path
        .unwrap_or_else(|| format!("/{}/dashboard", ctx.region().key()));

    Json(navigation::resolve(&ctx, &navigation::menu(), &path))
}
