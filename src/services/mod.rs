pub mod fare_service;
pub mod format_service;
pub mod invoice_service;
pub mod period_service;
pub mod route_service;
pub mod stats_service;
pub mod validation_service;
