// src/services/bed_dashboards.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, query_state::QueryState},
    models::{
        beds::{BedStatus, MaintenanceState, MaintenanceStatus, OccupancyMetrics},
        region::Region,
    },
    services::variants::RegionalVariants,
};

/// Dados que qualquer painel de leitos recebe.
#[derive(Debug, Clone)]
pub struct BedDashboardInput {
    pub care_home_name: Option<String>,
    pub registered_capacity: Option<u32>,
    /// "Hoje" no fuso do tenant
    pub today: NaiveDate,
    pub beds: QueryState<Vec<BedStatus>>,
    pub metrics: QueryState<OccupancyMetrics>,
    pub maintenance: QueryState<Vec<MaintenanceStatus>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Regulator {
    #[schema(example = "Care Quality Commission")]
    pub name: &'static str,
    #[schema(example = "CQC")]
    pub short_name: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedDashboardView {
    pub region: Region,
    #[schema(example = "Bed management")]
    pub title: String,
    pub subtitle: Option<String>,
    pub regulator: Regulator,
    pub alerts: Vec<String>,
    #[schema(value_type = Object)]
    pub metrics: QueryState<OccupancyMetrics>,
    #[schema(value_type = Object)]
    pub beds: QueryState<Vec<BedStatus>>,
    #[schema(value_type = Object)]
    pub maintenance: QueryState<Vec<MaintenanceStatus>>,
}

/// Contrato comum: cada região desenha o próprio painel de leitos.
pub trait BedDashboard: Send + Sync {
    fn region(&self) -> Region;
    fn render(&self, input: BedDashboardInput) -> BedDashboardView;
}

pub type BedDashboards = RegionalVariants<Box<dyn BedDashboard>>;

/// Tabela usada pelo servidor. Falta de região é erro de subida.
pub fn regional_dashboards() -> Result<BedDashboards, AppError> {
    let dashboards: Vec<Box<dyn BedDashboard>> = vec![
        Box::new(EnglandDashboard),
        Box::new(WalesDashboard),
        Box::new(ScotlandDashboard),
        Box::new(NorthernIrelandDashboard),
        Box::new(IrelandDashboard),
    ];

    RegionalVariants::try_from_entries(dashboards.into_iter().map(|d| (d.region(), d)))
}

// ---
// Regras compartilhadas
// ---

fn occupancy_alert(metrics: &QueryState<OccupancyMetrics>, threshold: f64, wording: &str) -> Option<String> {
    let m = metrics.ready()?;
    (m.total > 0 && m.occupancy_rate >= threshold)
        .then(|| format!("{} ({:.0}% occupied)", wording, m.occupancy_rate * 100.0))
}

fn capacity_alert(
    metrics: &QueryState<OccupancyMetrics>,
    registered: Option<u32>,
    regulator: &Regulator,
) -> Option<String> {
    let m = metrics.ready()?;
    let registered = registered?;
    (m.total > registered).then(|| {
        format!(
            "{} beds recorded but only {} registered with {}",
            m.total, registered, regulator.short_name
        )
    })
}

fn overdue_maintenance(maintenance: &QueryState<Vec<MaintenanceStatus>>, today: NaiveDate) -> usize {
    maintenance.ready().map_or(0, |items| {
        items
            .iter()
            .filter(|m| m.status != MaintenanceState::Completed && m.expected_end_date < today)
            .count()
    })
}

fn title_for(base: &str, care_home_name: Option<&str>) -> String {
    match care_home_name {
        Some(name) => format!("{} · {}", base, name),
        None => base.to_string(),
    }
}

// ---
// Variantes
// ---

pub struct EnglandDashboard;

impl BedDashboard for EnglandDashboard {
    fn region(&self) -> Region {
        Region::UkEngland
    }

    fn render(&self, input: BedDashboardInput) -> BedDashboardView {
        let regulator = Regulator {
            name: "Care Quality Commission",
            short_name: "CQC",
        };

        let mut alerts = Vec::new();
        alerts.extend(occupancy_alert(&input.metrics, 0.95, "Occupancy is near capacity"));
        alerts.extend(capacity_alert(&input.metrics, input.registered_capacity, &regulator));
        let overdue = overdue_maintenance(&input.maintenance, input.today);
        if overdue > 0 {
            alerts.push(format!("{} maintenance job(s) past their expected end date", overdue));
        }

        BedDashboardView {
            region: self.region(),
            title: title_for("Bed management", input.care_home_name.as_deref()),
            subtitle: None,
            regulator,
            alerts,
            metrics: input.metrics,
            beds: input.beds,
            maintenance: input.maintenance,
        }
    }
}

pub struct WalesDashboard;

impl BedDashboard for WalesDashboard {
    fn region(&self) -> Region {
        Region::UkWales
    }

    // Títulos bilíngues (galês primeiro)
    fn render(&self, input: BedDashboardInput) -> BedDashboardView {
        let regulator = Regulator {
            name: "Arolygiaeth Gofal Cymru / Care Inspectorate Wales",
            short_name: "CIW",
        };

        let mut alerts = Vec::new();
        alerts.extend(occupancy_alert(
            &input.metrics,
            0.95,
            "Mae'r cartref bron yn llawn / Occupancy is near capacity",
        ));
        alerts.extend(capacity_alert(&input.metrics, input.registered_capacity, &regulator));
        let overdue = overdue_maintenance(&input.maintenance, input.today);
        if overdue > 0 {
            alerts.push(format!(
                "{} gwaith cynnal a chadw yn hwyr / {} maintenance job(s) overdue",
                overdue, overdue
            ));
        }

        BedDashboardView {
            region: self.region(),
            title: title_for("Rheoli Gwelyau / Bed management", input.care_home_name.as_deref()),
            subtitle: Some("Gwasanaeth dwyieithog / Bilingual service".into()),
            regulator,
            alerts,
            metrics: input.metrics,
            beds: input.beds,
            maintenance: input.maintenance,
        }
    }
}

pub struct ScotlandDashboard;

impl BedDashboard for ScotlandDashboard {
    fn region(&self) -> Region {
        Region::UkScotland
    }

    fn render(&self, input: BedDashboardInput) -> BedDashboardView {
        let regulator = Regulator {
            name: "Care Inspectorate",
            short_name: "Care Inspectorate",
        };

        // Na Escócia o alerta de ocupação dispara mais cedo
        let mut alerts = Vec::new();
        alerts.extend(occupancy_alert(&input.metrics, 0.90, "Occupancy is high"));
        alerts.extend(capacity_alert(&input.metrics, input.registered_capacity, &regulator));
        let overdue = overdue_maintenance(&input.maintenance, input.today);
        if overdue > 0 {
            alerts.push(format!(
                "{} room(s) out of use beyond the planned date: consider notifying the Care Inspectorate",
                overdue
            ));
        }

        BedDashboardView {
            region: self.region(),
            title: title_for("Room availability", input.care_home_name.as_deref()),
            subtitle: None,
            regulator,
            alerts,
            metrics: input.metrics,
            beds: input.beds,
            maintenance: input.maintenance,
        }
    }
}

pub struct NorthernIrelandDashboard;

impl BedDashboard for NorthernIrelandDashboard {
    fn region(&self) -> Region {
        Region::UkNorthernIreland
    }

    fn render(&self, input: BedDashboardInput) -> BedDashboardView {
        let regulator = Regulator {
            name: "Regulation and Quality Improvement Authority",
            short_name: "RQIA",
        };

        let mut alerts = Vec::new();
        alerts.extend(occupancy_alert(&input.metrics, 0.95, "Occupancy is near capacity"));
        alerts.extend(capacity_alert(&input.metrics, input.registered_capacity, &regulator));
        let overdue = overdue_maintenance(&input.maintenance, input.today);
        if overdue > 0 {
            alerts.push(format!("{} maintenance job(s) overdue", overdue));
        }

        BedDashboardView {
            region: self.region(),
            title: title_for("Bed management", input.care_home_name.as_deref()),
            subtitle: Some("Registered with RQIA".into()),
            regulator,
            alerts,
            metrics: input.metrics,
            beds: input.beds,
            maintenance: input.maintenance,
        }
    }
}

pub struct IrelandDashboard;

impl BedDashboard for IrelandDashboard {
    fn region(&self) -> Region {
        Region::Ireland
    }

    fn render(&self, input: BedDashboardInput) -> BedDashboardView {
        let regulator = Regulator {
            name: "Health Information and Quality Authority",
            short_name: "HIQA",
        };

        let mut alerts = Vec::new();
        alerts.extend(occupancy_alert(&input.metrics, 0.95, "Designated centre is near capacity"));
        alerts.extend(capacity_alert(&input.metrics, input.registered_capacity, &regulator));

        // Leitos parados em manutenção contam contra a capacidade registrada
        if let Some(m) = input.metrics.ready() {
            if m.total > 0 && f64::from(m.maintenance) / f64::from(m.total) > 0.10 {
                alerts.push(format!(
                    "{} bed(s) out of service: more than 10% of the designated centre",
                    m.maintenance
                ));
            }
        }
        let overdue = overdue_maintenance(&input.maintenance, input.today);
        if overdue > 0 {
            alerts.push(format!("{} maintenance job(s) overdue", overdue));
        }

        BedDashboardView {
            region: self.region(),
            title: title_for("Designated centre beds", input.care_home_name.as_deref()),
            subtitle: None,
            regulator,
            alerts,
            metrics: input.metrics,
            beds: input.beds,
            maintenance: input.maintenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn input(metrics: OccupancyMetrics) -> BedDashboardInput {
        BedDashboardInput {
            care_home_name: Some("Rosewood".into()),
            registered_capacity: Some(10),
            today: today(),
            beds: QueryState::Empty,
            metrics: QueryState::Ready(metrics),
            maintenance: QueryState::Empty,
        }
    }

    #[test]
    fn every_region_has_its_own_dashboard() {
        let table = regional_dashboards().unwrap();
        for region in Region::ALL {
            assert_eq!(table.select(region).region(), region);
        }
    }

    #[test]
    fn variants_differ_by_region() {
        let table = regional_dashboards().unwrap();
        let metrics = OccupancyMetrics::from_counts(10, 7, 2, 1);

        let england = table.select(Region::UkEngland).render(input(metrics));
        let wales = table.select(Region::UkWales).render(input(metrics));
        let ireland = table.select(Region::Ireland).render(input(metrics));

        assert_eq!(england.regulator.short_name, "CQC");
        assert_eq!(england.title, "Bed management · Rosewood");
        assert!(wales.title.starts_with("Rheoli Gwelyau"));
        assert_eq!(ireland.regulator.short_name, "HIQA");
        assert!(england.alerts.is_empty());
    }

    #[test]
    fn scotland_warns_earlier_than_england() {
        let table = regional_dashboards().unwrap();
        let metrics = OccupancyMetrics::from_counts(10, 9, 1, 0);

        assert!(table.select(Region::UkEngland).render(input(metrics)).alerts.is_empty());
        assert_eq!(table.select(Region::UkScotland).render(input(metrics)).alerts.len(), 1);
    }

    #[test]
    fn flags_beds_beyond_registration() {
        let table = regional_dashboards().unwrap();
        let metrics = OccupancyMetrics::from_counts(12, 6, 6, 0);
        let view = table.select(Region::UkNorthernIreland).render(input(metrics));
        assert!(view.alerts.iter().any(|a| a.contains("only 10 registered with RQIA")));
    }

    #[test]
    fn overdue_maintenance_is_reported() {
        let table = regional_dashboards().unwrap();
        let mut data = input(OccupancyMetrics::from_counts(10, 5, 4, 1));
        data.maintenance = QueryState::Ready(vec![MaintenanceStatus {
            id: Uuid::new_v4(),
            bed_id: Uuid::new_v4(),
            kind: "flooring".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            expected_end_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            status: MaintenanceState::InProgress,
        }]);
        let view = table.select(Region::UkEngland).render(data);
        assert!(view.alerts.iter().any(|a| a.contains("past their expected end date")));
    }

    #[test]
    fn error_states_pass_through_without_alerts() {
        let table = regional_dashboards().unwrap();
        let mut data = input(OccupancyMetrics::from_counts(1, 1, 0, 0));
        data.metrics = QueryState::Error { message: "down".into() };
        let view = table.select(Region::Ireland).render(data);
        assert!(matches!(view.metrics, QueryState::Error { .. }));
        assert!(view.alerts.is_empty());
    }
}
