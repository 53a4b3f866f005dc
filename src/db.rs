pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod bed_repo;
pub use bed_repo::BedRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
