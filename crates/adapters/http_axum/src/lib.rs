//! # clinic-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the versioned JSON API under `/v1` for doctors, patients and the
//!   appointments each patient owns
//! - Turn path segments, query strings and request bodies into domain values
//!   (typed ids, profiles, bookings, filters)
//! - Map application results into HTTP responses, and every
//!   [`ClinicError`](clinic_domain::error::ClinicError) into a status code
//!   with a JSON error body
//!
//! ## Dependency rule
//! Depends on `clinic-app` (for port traits and services) and `clinic-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
mod extract;
pub mod router;
pub mod state;
