pub mod cards;
pub mod config;
pub mod domain;
pub mod dto;
pub mod engine;
pub mod errors;
pub mod hosting;
pub mod ids;
pub mod ops;
pub mod persistence;
pub mod scheduler;
pub mod telemetry;

pub use config::EngineConfig;
pub use errors::{EngineError, Result};

/// initializes logging and installs a ctrl-c handler that exits the
/// process.
pub fn init() {
    telemetry::init();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("forcing exit");
        std::process::exit(0);
    });
}

/// connects to postgres and runs the persistence-layer migration.
pub async fn db(database_url: &str) -> std::sync::Arc<tokio_postgres::Client> {
    persistence::postgres::connect(database_url)
        .await
        .expect("database connection failed")
}
