// src/services/bed_service.rs

use chrono::Utc;
use chrono_tz::Tz;

use crate::{
    common::{error::AppError, query_state::QueryState},
    db::BedRepository,
    models::{
        beds::{BedStatus, MaintenanceStatus, OccupancyMetrics},
        tenancy::TenantContext,
    },
    services::bed_dashboards::{BedDashboard, BedDashboardInput, BedDashboardView},
};

#[derive(Clone)]
pub struct BedService {
    repo: BedRepository,
}

impl BedService {
    pub fn new(repo: BedRepository) -> Self {
        Self { repo }
    }

    pub async fn status(&self, ctx: &TenantContext) -> Result<Vec<BedStatus>, AppError> {
        self.repo.list_beds(ctx.organization_id()).await
    }

    pub async fn metrics(&self, ctx: &TenantContext) -> Result<OccupancyMetrics, AppError> {
        let beds = self.repo.list_beds(ctx.organization_id()).await?;
        Ok(OccupancyMetrics::from_beds(&beds))
    }

    pub async fn maintenance(&self, ctx: &TenantContext) -> Result<Vec<MaintenanceStatus>, AppError> {
        self.repo.list_maintenance(ctx.organization_id()).await
    }

    /// Painel de leitos desenhado pela variante escolhida. Falha de uma
    /// consulta vira estado de erro naquele bloco; o painel sai mesmo assim.
    pub async fn overview(&self, ctx: &TenantContext, dashboard: &dyn BedDashboard) -> BedDashboardView {
        let (beds, maintenance) = tokio::join!(self.status(ctx), self.maintenance(ctx));

        let metrics = match &beds {
            Ok(list) => QueryState::Ready(OccupancyMetrics::from_beds(list)),
            Err(_) => QueryState::Error {
                message: "Occupancy is temporarily unavailable.".into(),
            },
        };

        let input = BedDashboardInput {
            care_home_name: ctx.settings().care_home_name.clone(),
            registered_capacity: ctx.settings().bed_capacity,
            today: local_today(ctx.timezone()),
            beds: QueryState::from_list(beds),
            metrics,
            maintenance: QueryState::from_list(maintenance),
        };

        dashboard.render(input)
    }
}

/// Data de hoje no fuso do tenant (validado na montagem do contexto).
fn local_today(timezone: &str) -> chrono::NaiveDate {
    match timezone.parse::<Tz>() {
        Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
        Err(_) => Utc::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_today_follows_the_timezone() {
        let london = local_today("Europe/London");
        let kiritimati = local_today("Pacific/Kiritimati");
        // +14h: nunca fica atrás de Londres
        assert!(kiritimati >= london);
    }
}
