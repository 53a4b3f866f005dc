pub mod audit;
pub mod auth;
pub mod beds;
pub mod finance;
pub mod locale;
pub mod navigation;
pub mod region;
pub mod settings;
pub mod tenancy;
pub mod verification;
