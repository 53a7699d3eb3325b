pub use configuration::*;
pub use startup::{
    document_store,
    DekapletApp,
};
pub use telemetry::setup_tracing;

mod configuration;
mod startup;
mod telemetry;
