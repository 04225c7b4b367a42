//! Doctor service: use-cases for managing doctors.

use clinic_domain::doctor::{Doctor, DoctorProfile};
use clinic_domain::error::{BadRequestError, ClinicError, NotFoundError};
use clinic_domain::filter::DoctorFilter;
use clinic_domain::id::DoctorId;
use clinic_domain::page::Page;
use clinic_domain::speciality::Speciality;
use clinic_domain::time::now;

use crate::ports::{DoctorRepository, SpecialityRepository};

/// Application service for doctor registration and profile management.
pub struct DoctorService<R, S> {
    repo: R,
    specialities: S,
}

impl<R: DoctorRepository, S: SpecialityRepository> DoctorService<R, S> {
    /// Create a new service backed by the given repositories.
    pub fn new(repo: R, specialities: S) -> Self {
        Self { repo, specialities }
    }

    /// Register a new doctor.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::BadRequest`] when another doctor already uses the
    /// email or the speciality does not exist, or a storage error.
    #[tracing::instrument(skip(self, profile))]
    pub async fn create_doctor(&self, profile: DoctorProfile) -> Result<Doctor, ClinicError> {
        tracing::info!(email = %profile.email, "checking for another doctor with the same email");
        if self.repo.exists_by_email(&profile.email).await? {
            return Err(BadRequestError::DuplicateEmail {
                entity: "doctor",
                email: profile.email,
            }
            .into());
        }
        let speciality = self.resolve_speciality(&profile).await?;
        self.repo
            .create(Doctor::register(profile, speciality, now()))
            .await
    }

    /// Look up a doctor by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when no doctor with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_doctor(&self, id: DoctorId) -> Result<Doctor, ClinicError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Doctor",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// One page of doctors matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, filter))]
    pub async fn list_doctors(&self, filter: &DoctorFilter) -> Result<Page<Doctor>, ClinicError> {
        self.repo.find_page(&filter.predicates(), &filter.page).await
    }

    /// Replace the profile of an existing doctor.
    ///
    /// Email uniqueness is not re-checked on update.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the doctor does not exist,
    /// [`ClinicError::BadRequest`] when the speciality does not exist,
    /// or a storage error.
    #[tracing::instrument(skip(self, profile))]
    pub async fn update_doctor(
        &self,
        id: DoctorId,
        profile: DoctorProfile,
    ) -> Result<Doctor, ClinicError> {
        let mut doctor = self.get_doctor(id).await?;
        let speciality = self.resolve_speciality(&profile).await?;
        doctor.apply(profile, speciality);
        self.repo.update(doctor).await
    }

    /// Delete a doctor by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::NotFound`] when the doctor does not exist,
    /// [`ClinicError::Conflict`] while appointments still reference it,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_doctor(&self, id: DoctorId) -> Result<(), ClinicError> {
        self.get_doctor(id).await?;
        self.repo.delete(id).await?;
        tracing::info!("doctor deleted");
        Ok(())
    }

    async fn resolve_speciality(&self, profile: &DoctorProfile) -> Result<Speciality, ClinicError> {
        let id = profile.speciality_id;
        self.specialities
            .get_by_id(id)
            .await?
            .ok_or_else(|| BadRequestError::UnknownSpeciality(id.to_string()).into())
    }
}
