//! Listing filters for doctors, patients and appointments.
//!
//! Each filter pairs a [`PageRequest`] with optional criteria and compiles the
//! criteria into a [`PredicateSet`] over the entity's field enum. Storage
//! adapters map the field enums onto columns.

use chrono::NaiveDate;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::id::{DoctorId, PatientId};
use crate::page::PageRequest;
use crate::query::{Comparison, PredicateSet, Queryable, Value};
use crate::time::{self, Timestamp};

/// Filterable attributes of a [`Doctor`](crate::doctor::Doctor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoctorField {
    FirstName,
    LastName,
    Email,
    /// Description of the doctor's speciality.
    Speciality,
}

/// Filterable attributes of a [`Patient`](crate::patient::Patient).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    FirstName,
    LastName,
    Email,
}

/// Filterable attributes of an [`Appointment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentField {
    PatientId,
    DoctorId,
    Status,
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub page: PageRequest,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub speciality: Option<String>,
}

impl DoctorFilter {
    #[must_use]
    pub fn predicates(&self) -> PredicateSet<DoctorField> {
        PredicateSet::new()
            .optional(DoctorField::FirstName, Comparison::ContainsIgnoreCase, self.first_name.clone())
            .optional(DoctorField::LastName, Comparison::ContainsIgnoreCase, self.last_name.clone())
            .optional(DoctorField::Email, Comparison::ContainsIgnoreCase, self.email.clone())
            .optional(DoctorField::Speciality, Comparison::ContainsIgnoreCase, self.speciality.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub page: PageRequest,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl PatientFilter {
    #[must_use]
    pub fn predicates(&self) -> PredicateSet<PatientField> {
        PredicateSet::new()
            .optional(PatientField::FirstName, Comparison::ContainsIgnoreCase, self.first_name.clone())
            .optional(PatientField::LastName, Comparison::ContainsIgnoreCase, self.last_name.clone())
            .optional(PatientField::Email, Comparison::ContainsIgnoreCase, self.email.clone())
    }
}

/// Criteria for one patient's appointments.
///
/// `start_date` bounds `start_time` from `00:00:00` of that day and `end_date`
/// bounds `end_time` up to `23:59:59.999999999` of that day, both inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub page: PageRequest,
    pub doctor_id: Option<DoctorId>,
    pub status: Option<AppointmentStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AppointmentFilter {
    /// Predicates scoped to the appointments owned by `patient_id`.
    #[must_use]
    pub fn predicates(&self, patient_id: PatientId) -> PredicateSet<AppointmentField> {
        PredicateSet::new()
            .require(AppointmentField::PatientId, Comparison::Equals, patient_id.as_uuid())
            .optional(
                AppointmentField::DoctorId,
                Comparison::Equals,
                self.doctor_id.map(DoctorId::as_uuid),
            )
            .optional(
                AppointmentField::Status,
                Comparison::Equals,
                self.status.map(AppointmentStatus::as_str),
            )
            .optional(
                AppointmentField::StartTime,
                Comparison::AtLeast,
                self.start_date.map(time::start_of_day),
            )
            .optional(
                AppointmentField::EndTime,
                Comparison::AtMost,
                self.end_date.map(time::end_of_day),
            )
    }
}

impl Queryable for Appointment {
    type Field = AppointmentField;

    fn value_of(&self, field: AppointmentField) -> Option<Value> {
        Some(match field {
            AppointmentField::PatientId => self.patient_id.as_uuid().into(),
            AppointmentField::DoctorId => self.doctor_id.as_uuid().into(),
            AppointmentField::Status => self.status.as_str().into(),
            AppointmentField::StartTime => self.start_time.into(),
            AppointmentField::EndTime => self.end_time.into(),
        })
    }

    fn listing_key(&self) -> (Timestamp, uuid::Uuid) {
        (self.created_at, self.id.as_uuid())
    }
}
