pub mod app;
pub mod assets;
pub mod metrics;
pub mod session;
