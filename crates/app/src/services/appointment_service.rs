//! Appointment service: booking and lifecycle use-cases.
//!
//! Every operation is scoped by the owning patient: an appointment looked up
//! under another patient's id is reported as not found.

use clinic_domain::appointment::{Appointment, Booking};
use clinic_domain::error::{ClinicError, NotFoundError};
use clinic_domain::filter::AppointmentFilter;
use clinic_domain::id::{AppointmentId, DoctorId, PatientId};
use clinic_domain::page::Page;
use clinic_domain::time::now;

use crate::ports::{AppointmentRepository, DoctorRepository, PatientRepository};

/// Application service owning the appointment lifecycle.
pub struct AppointmentService<A, D, P> {
    repo: A,
    doctors: D,
    patients: P,
}

impl<A, D, P> AppointmentService<A, D, P>
where
    A: AppointmentRepository,
    D: DoctorRepository,
    P: PatientRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(repo: A, doctors: D, patients: P) -> Self {
        Self {
            repo,
            doctors,
            patients,
        }
    }

    /// Book a new `SCHEDULED` one-hour appointment.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the doctor or the patient does
    /// not exist, or a storage error.
    #[tracing::instrument(skip(self, booking), fields(doctor_id = %booking.doctor_id))]
    pub async fn create_appointment(
        &self,
        patient_id: PatientId,
        booking: Booking,
    ) -> Result<Appointment, ClinicError> {
        self.ensure_doctor(booking.doctor_id).await?;
        self.ensure_patient(patient_id).await?;
        self.repo
            .create(Appointment::schedule(patient_id, booking, now()))
            .await
    }

    /// Look up an appointment owned by `patient_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when no appointment with `id` belongs
    /// to the patient, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_appointment(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
    ) -> Result<Appointment, ClinicError> {
        self.repo
            .get_by_id_for_patient(id, patient_id)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Appointment",
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// One page of the patient's appointments matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, filter))]
    pub async fn list_appointments(
        &self,
        patient_id: PatientId,
        filter: &AppointmentFilter,
    ) -> Result<Page<Appointment>, ClinicError> {
        self.repo
            .find_page(&filter.predicates(patient_id), &filter.page)
            .await
    }

    /// Move a `SCHEDULED` appointment to another doctor or slot.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the doctor, the patient or the
    /// scoped appointment does not exist, [`ClinicError::Conflict`] unless the
    /// appointment is `SCHEDULED`, or a storage error.
    #[tracing::instrument(skip(self, booking), fields(doctor_id = %booking.doctor_id))]
    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
        booking: Booking,
    ) -> Result<Appointment, ClinicError> {
        self.ensure_doctor(booking.doctor_id).await?;
        self.ensure_patient(patient_id).await?;
        let mut appointment = self.get_appointment(id, patient_id).await?;
        appointment.reschedule(booking, now())?;
        self.repo.update(appointment).await
    }

    /// Cancel an appointment whatever its current status.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the scoped appointment does not
    /// exist, or a storage error.
    #[tracing::instrument(skip(self, reason))]
    pub async fn cancel_appointment(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
        reason: String,
    ) -> Result<Appointment, ClinicError> {
        tracing::info!(%reason, "cancelling appointment");
        let mut appointment = self.get_appointment(id, patient_id).await?;
        appointment.cancel(reason, now());
        self.repo.update(appointment).await
    }

    /// Permanently remove a `SCHEDULED` appointment.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the scoped appointment does not
    /// exist, [`ClinicError::Conflict`] unless it is `SCHEDULED`, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_appointment(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
    ) -> Result<(), ClinicError> {
        let appointment = self.get_appointment(id, patient_id).await?;
        appointment.ensure_deletable()?;
        self.repo.delete(id).await?;
        tracing::info!("appointment deleted");
        Ok(())
    }

    async fn ensure_doctor(&self, id: DoctorId) -> Result<(), ClinicError> {
        match self.doctors.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Doctor",
                id: id.to_string(),
            }
            .into()),
        }
    }

    async fn ensure_patient(&self, id: PatientId) -> Result<(), ClinicError> {
        match self.patients.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "Patient",
                id: id.to_string(),
            }
            .into()),
        }
    }
}
