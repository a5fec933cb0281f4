pub mod arrivals;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod metrics;
pub mod models;
pub mod output;
pub mod pool;
pub mod presets;
pub mod schedule;
pub mod session;
