//! Patient service: use-cases for managing patients.

use clinic_domain::error::{BadRequestError, ClinicError, NotFoundError};
use clinic_domain::filter::PatientFilter;
use clinic_domain::id::PatientId;
use clinic_domain::page::Page;
use clinic_domain::patient::{Patient, PatientProfile};
use clinic_domain::time::now;

use crate::ports::PatientRepository;

/// Application service for patient registration and profile management.
pub struct PatientService<R> {
    repo: R,
}

impl<R: PatientRepository> PatientService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new patient.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::BadRequest`] when another patient already uses
    /// the email, or a storage error.
    #[tracing::instrument(skip(self, profile))]
    pub async fn create_patient(&self, profile: PatientProfile) -> Result<Patient, ClinicError> {
        tracing::info!(email = %profile.email, "checking for another patient with the same email");
        if self.repo.exists_by_email(&profile.email).await? {
            return Err(BadRequestError::DuplicateEmail {
                entity: "patient",
                email: profile.email,
            }
            .into());
        }
        self.repo.create(Patient::register(profile, now())).await
    }

    /// Look up a patient by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when no patient with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_patient(&self, id: PatientId) -> Result<Patient, ClinicError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Patient",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// One page of patients matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, filter))]
    pub async fn list_patients(
        &self,
        filter: &PatientFilter,
    ) -> Result<Page<Patient>, ClinicError> {
        self.repo.find_page(&filter.predicates(), &filter.page).await
    }

    /// Replace the profile of an existing patient.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the patient does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self, profile))]
    pub async fn update_patient(
        &self,
        id: PatientId,
        profile: PatientProfile,
    ) -> Result<Patient, ClinicError> {
        let mut patient = self.get_patient(id).await?;
        patient.apply(profile);
        self.repo.update(patient).await
    }

    /// Delete a patient and, with it, every appointment it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the patient does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_patient(&self, id: PatientId) -> Result<(), ClinicError> {
        self.get_patient(id).await?;
        self.repo.delete(id).await?;
        tracing::info!("patient deleted");
        Ok(())
    }
}
