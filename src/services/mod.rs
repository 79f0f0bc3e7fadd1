// Business logic services

pub mod import_service;
pub mod reporting_service;

pub use import_service::ImportService;
pub use reporting_service::ReportingService;
