pub mod account;
pub mod admin;
pub mod dashboard;
pub mod fare;
pub mod health;
pub mod invoice;
pub mod order;
pub mod rate_settings;
pub mod route_estimate;
pub mod trip;
