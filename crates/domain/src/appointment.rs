//! Appointment: a one-hour slot booked by a patient with a doctor.
//!
//! The appointment owns its lifecycle: the derived slot fields (`end_time`,
//! `duration`) are recomputed on every successful create or update, and the
//! cancellation fields are set exactly when the status becomes `CANCELLED`.

mod kind;
mod status;

pub use kind::AppointmentType;
pub use status::AppointmentStatus;

use serde::{Deserialize, Serialize};

use crate::error::{BlockedAction, ConflictError, ValidationError};
use crate::id::{AppointmentId, DoctorId, PatientId};
use crate::time::{self, APPOINTMENT_DURATION_MINUTES, LocalDateTime, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub start_time: LocalDateTime,
    pub end_time: LocalDateTime,
    /// Slot length in minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: Option<AppointmentType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: AppointmentStatus,
    pub cancellation_reason: Option<String>,
    pub cancellation_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub last_updated: Option<Timestamp>,
}

/// Details supplied by the front desk when booking or moving an appointment.
///
/// The slot is checked once here, so scheduling from a booking cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub doctor_id: DoctorId,
    start_time: LocalDateTime,
    end_time: LocalDateTime,
    pub kind: Option<AppointmentType>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Booking {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on `startTime` when the one-hour slot
    /// does not fit between years 0 and 9999.
    pub fn new(doctor_id: DoctorId, start_time: LocalDateTime) -> Result<Self, ValidationError> {
        let end_time = time::slot_end(start_time).ok_or_else(|| {
            ValidationError::single("startTime", "Appointment start time is out of range")
        })?;
        Ok(Self {
            doctor_id,
            start_time,
            end_time,
            kind: None,
            title: None,
            description: None,
        })
    }

    #[must_use]
    pub fn start_time(&self) -> LocalDateTime {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> LocalDateTime {
        self.end_time
    }

    #[must_use]
    pub fn kind(mut self, kind: AppointmentType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Appointment {
    /// Open a new `SCHEDULED` appointment for `patient_id`.
    #[must_use]
    pub fn schedule(patient_id: PatientId, booking: Booking, now: Timestamp) -> Self {
        Self {
            id: AppointmentId::new(),
            patient_id,
            doctor_id: booking.doctor_id,
            start_time: booking.start_time,
            end_time: booking.end_time,
            duration: APPOINTMENT_DURATION_MINUTES,
            kind: booking.kind,
            title: booking.title,
            description: booking.description,
            status: AppointmentStatus::Scheduled,
            cancellation_reason: None,
            cancellation_time: None,
            created_at: now,
            last_updated: None,
        }
    }

    /// Move the appointment to another doctor or slot and replace its texts.
    ///
    /// The appointment type is kept as booked.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::NotScheduled`] unless the status is `SCHEDULED`;
    /// the appointment is left untouched in that case.
    pub fn reschedule(&mut self, booking: Booking, now: Timestamp) -> Result<(), ConflictError> {
        self.ensure_mutable(BlockedAction::Update)?;
        self.doctor_id = booking.doctor_id;
        self.title = booking.title;
        self.description = booking.description;
        self.start_time = booking.start_time;
        self.end_time = booking.end_time;
        self.duration = APPOINTMENT_DURATION_MINUTES;
        self.last_updated = Some(now);
        Ok(())
    }

    /// Cancel from any state. Cancelling twice overwrites the reason and time.
    pub fn cancel(&mut self, reason: impl Into<String>, now: Timestamp) {
        self.status = AppointmentStatus::Cancelled;
        self.cancellation_reason = Some(reason.into());
        self.cancellation_time = Some(now);
        self.last_updated = Some(now);
    }

    /// # Errors
    ///
    /// Returns [`ConflictError::NotScheduled`] unless the status is `SCHEDULED`.
    pub fn ensure_deletable(&self) -> Result<(), ConflictError> {
        self.ensure_mutable(BlockedAction::Delete)
    }

    fn ensure_mutable(&self, action: BlockedAction) -> Result<(), ConflictError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(ConflictError::NotScheduled {
                action: action.past_participle(),
                status: self.status,
            })
        }
    }
}
