//! `SQLite` implementation of [`AppointmentRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clinic_app::ports::AppointmentRepository;
use clinic_domain::appointment::{Appointment, AppointmentType};
use clinic_domain::error::ClinicError;
use clinic_domain::filter::AppointmentField;
use clinic_domain::id::{AppointmentId, PatientId};
use clinic_domain::page::{Page, PageRequest};
use clinic_domain::query::PredicateSet;

use crate::codec;
use crate::error::StorageError;
use crate::query::{self, Column, Listing};

/// Wrapper for converting database rows into domain [`Appointment`].
struct Wrapper(Appointment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Appointment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let patient_id: String = row.try_get("patient_id")?;
        let doctor_id: String = row.try_get("doctor_id")?;
        let start_time: String = row.try_get("start_time")?;
        let end_time: String = row.try_get("end_time")?;
        let duration: i64 = row.try_get("duration")?;
        let kind: Option<String> = row.try_get("type")?;
        let status: String = row.try_get("status")?;
        let cancellation_time: Option<String> = row.try_get("cancellation_time")?;
        let created_at: String = row.try_get("created_at")?;
        let last_updated: Option<String> = row.try_get("last_updated")?;

        Ok(Self(Appointment {
            id: codec::decode_text(&id)?,
            patient_id: codec::decode_text(&patient_id)?,
            doctor_id: codec::decode_text(&doctor_id)?,
            start_time: codec::decode_local(&start_time)?,
            end_time: codec::decode_local(&end_time)?,
            duration: u32::try_from(duration).map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            kind: kind
                .as_deref()
                .map(codec::decode_text::<AppointmentType>)
                .transpose()?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: codec::decode_text(&status)?,
            cancellation_reason: row.try_get("cancellation_reason")?,
            cancellation_time: cancellation_time
                .as_deref()
                .map(codec::decode_timestamp)
                .transpose()?,
            created_at: codec::decode_timestamp(&created_at)?,
            last_updated: last_updated
                .as_deref()
                .map(codec::decode_timestamp)
                .transpose()?,
        }))
    }
}

impl Column for AppointmentField {
    fn column(self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::DoctorId => "doctor_id",
            Self::Status => "status",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
        }
    }

    /// No appointment field is searched as text.
    fn folded_column(self) -> &'static str {
        self.column()
    }
}

const SELECT: &str = "SELECT * FROM appointments";
const SELECT_BY_ID_FOR_PATIENT: &str =
    "SELECT * FROM appointments WHERE id = ? AND patient_id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM appointments";
const INSERT: &str = "INSERT INTO appointments \
     (id, patient_id, doctor_id, start_time, end_time, duration, type, title, description, \
     status, cancellation_reason, cancellation_time, created_at, last_updated) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const UPDATE: &str = "UPDATE appointments SET doctor_id = ?, start_time = ?, end_time = ?, \
     duration = ?, type = ?, title = ?, description = ?, status = ?, cancellation_reason = ?, \
     cancellation_time = ?, last_updated = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM appointments WHERE id = ?";

const LISTING: Listing = Listing {
    select: SELECT,
    count: COUNT,
    created_at: "created_at",
    id: "id",
};

/// `SQLite`-backed appointment repository.
#[derive(Clone)]
pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    fn create(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(appointment.id.to_string())
                .bind(appointment.patient_id.to_string())
                .bind(appointment.doctor_id.to_string())
                .bind(codec::encode_local(appointment.start_time))
                .bind(codec::encode_local(appointment.end_time))
                .bind(i64::from(appointment.duration))
                .bind(appointment.kind.map(AppointmentType::as_str))
                .bind(&appointment.title)
                .bind(&appointment.description)
                .bind(appointment.status.as_str())
                .bind(&appointment.cancellation_reason)
                .bind(appointment.cancellation_time.map(codec::encode_timestamp))
                .bind(codec::encode_timestamp(appointment.created_at))
                .bind(appointment.last_updated.map(codec::encode_timestamp))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment)
        }
    }

    fn get_by_id_for_patient(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<Option<Appointment>, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID_FOR_PATIENT)
                .bind(id.to_string())
                .bind(patient_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(appointment.doctor_id.to_string())
                .bind(codec::encode_local(appointment.start_time))
                .bind(codec::encode_local(appointment.end_time))
                .bind(i64::from(appointment.duration))
                .bind(appointment.kind.map(AppointmentType::as_str))
                .bind(&appointment.title)
                .bind(&appointment.description)
                .bind(appointment.status.as_str())
                .bind(&appointment.cancellation_reason)
                .bind(appointment.cancellation_time.map(codec::encode_timestamp))
                .bind(appointment.last_updated.map(codec::encode_timestamp))
                .bind(appointment.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(appointment)
        }
    }

    fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn find_page(
        &self,
        predicates: &PredicateSet<AppointmentField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Appointment>, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            let page: Page<Wrapper> = query::find_page(&pool, &LISTING, predicates, page).await?;
            Ok(page.map(|w| w.0))
        }
    }
}
