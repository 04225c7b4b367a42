//! # clinicd: clinic back-office daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`clinic.toml`, environment variables)
//! - Initialize `tracing` from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use clinic_adapter_http_axum::state::AppState;
use clinic_adapter_storage_sqlite_sqlx::{
    SqliteAppointmentRepository, SqliteDoctorRepository, SqlitePatientRepository,
    SqliteSpecialityRepository,
};
use clinic_app::services::appointment_service::AppointmentService;
use clinic_app::services::doctor_service::DoctorService;
use clinic_app::services::patient_service::PatientService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = clinic_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let doctor_repo = SqliteDoctorRepository::new(pool.clone());
    let speciality_repo = SqliteSpecialityRepository::new(pool.clone());
    let patient_repo = SqlitePatientRepository::new(pool.clone());
    let appointment_repo = SqliteAppointmentRepository::new(pool);

    // Services
    let doctor_service = DoctorService::new(doctor_repo.clone(), speciality_repo);
    let patient_service = PatientService::new(patient_repo.clone());
    let appointment_service =
        AppointmentService::new(appointment_repo, doctor_repo, patient_repo);

    // HTTP
    let state = AppState::new(doctor_service, patient_service, appointment_service);
    let app = clinic_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "clinicd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("clinicd stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
