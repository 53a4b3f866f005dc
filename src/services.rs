pub mod auth;
pub mod bed_dashboards;
pub mod bed_service;
pub mod finance_service;
pub mod navigation;
pub mod region_resolver;
pub mod tenancy_service;
pub mod variants;
pub mod verification_service;
