pub mod cache;
pub mod services;
pub mod telemetry;

pub use cache::CacheConfig;
pub use services::{AdvisorConfig, ServicesConfig};
pub use telemetry::TelemetryConfig;
