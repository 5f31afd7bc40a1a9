pub mod config;
pub mod credentials;
pub mod telemetry;
pub mod trust;

pub use credentials::update;
