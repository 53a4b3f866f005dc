pub mod accounting;
pub mod bed_management;
pub mod navigation;
pub mod pages;
pub mod tenancy;
pub mod verification;
