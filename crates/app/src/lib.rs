//! # clinic-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DoctorRepository`: CRUD, paginated search and email lookup for doctors
//!   - `PatientRepository`: CRUD, paginated search and email lookup for patients
//!   - `AppointmentRepository`: patient-scoped CRUD and paginated search
//!   - `SpecialityRepository`: read-only reference data
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DoctorService` / `PatientService`: registration and profile management
//!   - `AppointmentService`: booking, rescheduling, cancellation, deletion
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `clinic-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod in_memory;
