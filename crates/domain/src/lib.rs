//! # clinic-domain
//!
//! Pure domain model for the clinic back-office.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Doctors**, **Patients** and the **Speciality** reference data
//! - Define **Appointments** and their lifecycle (`SCHEDULED` → `CONFIRMED` / `COMPLETED` / `CANCELLED`)
//! - Define the **listing filters**, compiled into predicate sets and paginated
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appointment;
pub mod doctor;
pub mod filter;
pub mod page;
pub mod patient;
pub mod query;
pub mod speciality;
