//! # clinic-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `clinic-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Compile listing predicates into paginated SQL queries
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `clinic-app` (for port traits) and `clinic-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod appointment_repo;
mod codec;
mod doctor_repo;
mod error;
mod patient_repo;
mod pool;
mod query;
mod speciality_repo;

pub use appointment_repo::SqliteAppointmentRepository;
pub use doctor_repo::SqliteDoctorRepository;
pub use error::StorageError;
pub use patient_repo::SqlitePatientRepository;
pub use pool::{Config, Database};
pub use speciality_repo::SqliteSpecialityRepository;
