pub mod i18n;
pub mod rbac;
pub mod session;
pub mod tenancy;
