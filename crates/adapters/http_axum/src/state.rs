//! Shared application state for axum handlers.

use std::sync::Arc;

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};
use clinic_app::services::appointment_service::AppointmentService;
use clinic_app::services::doctor_service::DoctorService;
use clinic_app::services::patient_service::PatientService;

/// Application state shared across all axum handlers.
///
/// Generic over the doctor, speciality, patient and appointment repositories
/// to avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<DR, SR, PR, AR> {
    /// Doctor CRUD service.
    pub doctor_service: Arc<DoctorService<DR, SR>>,
    /// Patient CRUD service.
    pub patient_service: Arc<PatientService<PR>>,
    /// Appointment lifecycle service.
    pub appointment_service: Arc<AppointmentService<AR, DR, PR>>,
}

impl<DR, SR, PR, AR> Clone for AppState<DR, SR, PR, AR> {
    fn clone(&self) -> Self {
        Self {
            doctor_service: Arc::clone(&self.doctor_service),
            patient_service: Arc::clone(&self.patient_service),
            appointment_service: Arc::clone(&self.appointment_service),
        }
    }
}

impl<DR, SR, PR, AR> AppState<DR, SR, PR, AR>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        doctor_service: DoctorService<DR, SR>,
        patient_service: PatientService<PR>,
        appointment_service: AppointmentService<AR, DR, PR>,
    ) -> Self {
        Self {
            doctor_service: Arc::new(doctor_service),
            patient_service: Arc::new(patient_service),
            appointment_service: Arc::new(appointment_service),
        }
    }
}
