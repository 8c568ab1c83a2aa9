pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod metrics;

pub use startup::{build_app, run};
