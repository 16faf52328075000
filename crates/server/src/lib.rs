pub mod routes;
pub mod startup;
pub mod errors;
pub mod observability;
pub mod openapi;

pub use startup::{load_config, run};
