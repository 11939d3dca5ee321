pub mod account;
pub mod dashboard;
pub mod invoice;
pub mod order;
pub mod rate_settings;
pub mod trip;
