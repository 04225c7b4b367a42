//! Storage port: repository traits for persistence.
//!
//! Listings receive an already compiled [`PredicateSet`] and a [`PageRequest`];
//! implementations return the requested page newest first (creation time, then
//! id, both descending) together with the number of rows matching overall.

use std::future::Future;

use clinic_domain::appointment::Appointment;
use clinic_domain::doctor::Doctor;
use clinic_domain::error::ClinicError;
use clinic_domain::filter::{AppointmentField, DoctorField, PatientField};
use clinic_domain::id::{AppointmentId, DoctorId, PatientId, SpecialityId};
use clinic_domain::page::{Page, PageRequest};
use clinic_domain::patient::Patient;
use clinic_domain::query::PredicateSet;
use clinic_domain::speciality::Speciality;

/// Read access to the seeded speciality reference data.
pub trait SpecialityRepository {
    fn get_by_id(
        &self,
        id: SpecialityId,
    ) -> impl Future<Output = Result<Option<Speciality>, ClinicError>> + Send;
}

pub trait DoctorRepository {
    fn create(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send;

    fn get_by_id(
        &self,
        id: DoctorId,
    ) -> impl Future<Output = Result<Option<Doctor>, ClinicError>> + Send;

    fn update(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send;

    /// Remove a doctor.
    ///
    /// Fails with [`ClinicError::Conflict`] while appointments still reference it.
    fn delete(&self, id: DoctorId) -> impl Future<Output = Result<(), ClinicError>> + Send;

    fn find_page(
        &self,
        predicates: &PredicateSet<DoctorField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Doctor>, ClinicError>> + Send;

    fn exists_by_email(&self, email: &str) -> impl Future<Output = Result<bool, ClinicError>> + Send;
}

pub trait PatientRepository {
    fn create(&self, patient: Patient)
    -> impl Future<Output = Result<Patient, ClinicError>> + Send;

    fn get_by_id(
        &self,
        id: PatientId,
    ) -> impl Future<Output = Result<Option<Patient>, ClinicError>> + Send;

    fn update(&self, patient: Patient)
    -> impl Future<Output = Result<Patient, ClinicError>> + Send;

    /// Remove a patient together with its appointments.
    fn delete(&self, id: PatientId) -> impl Future<Output = Result<(), ClinicError>> + Send;

    fn find_page(
        &self,
        predicates: &PredicateSet<PatientField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Patient>, ClinicError>> + Send;

    fn exists_by_email(&self, email: &str) -> impl Future<Output = Result<bool, ClinicError>> + Send;
}

pub trait AppointmentRepository {
    fn create(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send;

    /// Look up an appointment only if it belongs to `patient_id`.
    fn get_by_id_for_patient(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<Option<Appointment>, ClinicError>> + Send;

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send;

    fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), ClinicError>> + Send;

    fn find_page(
        &self,
        predicates: &PredicateSet<AppointmentField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Appointment>, ClinicError>> + Send;
}
