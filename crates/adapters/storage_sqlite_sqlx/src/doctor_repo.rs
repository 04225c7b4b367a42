//! `SQLite` implementation of [`DoctorRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clinic_app::ports::DoctorRepository;
use clinic_domain::doctor::Doctor;
use clinic_domain::error::ClinicError;
use clinic_domain::filter::DoctorField;
use clinic_domain::id::DoctorId;
use clinic_domain::page::{Page, PageRequest};
use clinic_domain::query::{PredicateSet, fold_case};
use clinic_domain::speciality::Speciality;

use crate::codec;
use crate::error::{StorageError, still_referenced};
use crate::query::{self, Column, Listing};

/// Wrapper for converting database rows into domain [`Doctor`].
struct Wrapper(Doctor);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Doctor> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let speciality_id: String = row.try_get("speciality_id")?;
        let speciality_description: String = row.try_get("speciality_description")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Doctor {
            id: codec::decode_text(&id)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            title: row.try_get("title")?,
            speciality: Speciality::new(codec::decode_text(&speciality_id)?, speciality_description),
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            created_at: codec::decode_timestamp(&created_at)?,
        }))
    }
}

impl Column for DoctorField {
    fn column(self) -> &'static str {
        match self {
            Self::FirstName => "d.first_name",
            Self::LastName => "d.last_name",
            Self::Email => "d.email",
            Self::Speciality => "s.description",
        }
    }

    fn folded_column(self) -> &'static str {
        match self {
            Self::FirstName => "d.first_name_folded",
            Self::LastName => "d.last_name_folded",
            Self::Email => "d.email_folded",
            Self::Speciality => "s.description_folded",
        }
    }
}

const SELECT: &str = "SELECT d.id, d.first_name, d.last_name, d.title, d.speciality_id, \
     s.description AS speciality_description, d.email, d.phone, d.department, d.created_at \
     FROM doctors d JOIN specialities s ON s.id = d.speciality_id";
const SELECT_BY_ID: &str = "SELECT d.id, d.first_name, d.last_name, d.title, d.speciality_id, \
     s.description AS speciality_description, d.email, d.phone, d.department, d.created_at \
     FROM doctors d JOIN specialities s ON s.id = d.speciality_id WHERE d.id = ?";
const COUNT: &str =
    "SELECT COUNT(*) FROM doctors d JOIN specialities s ON s.id = d.speciality_id";
const INSERT: &str = "INSERT INTO doctors \
     (id, first_name, last_name, title, speciality_id, email, phone, department, created_at, \
     first_name_folded, last_name_folded, email_folded) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const UPDATE: &str = "UPDATE doctors SET first_name = ?, last_name = ?, title = ?, \
     speciality_id = ?, email = ?, phone = ?, department = ?, \
     first_name_folded = ?, last_name_folded = ?, email_folded = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM doctors WHERE id = ?";
const EXISTS_BY_EMAIL: &str = "SELECT EXISTS(SELECT 1 FROM doctors WHERE email = ?)";

const LISTING: Listing = Listing {
    select: SELECT,
    count: COUNT,
    created_at: "d.created_at",
    id: "d.id",
};

/// `SQLite`-backed doctor repository.
#[derive(Clone)]
pub struct SqliteDoctorRepository {
    pool: SqlitePool,
}

impl SqliteDoctorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DoctorRepository for SqliteDoctorRepository {
    fn create(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(doctor.id.to_string())
                .bind(&doctor.first_name)
                .bind(&doctor.last_name)
                .bind(&doctor.title)
                .bind(doctor.speciality.id.to_string())
                .bind(&doctor.email)
                .bind(&doctor.phone)
                .bind(&doctor.department)
                .bind(codec::encode_timestamp(doctor.created_at))
                .bind(fold_case(&doctor.first_name))
                .bind(fold_case(&doctor.last_name))
                .bind(fold_case(&doctor.email))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(doctor)
        }
    }

    fn get_by_id(
        &self,
        id: DoctorId,
    ) -> impl Future<Output = Result<Option<Doctor>, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&doctor.first_name)
                .bind(&doctor.last_name)
                .bind(&doctor.title)
                .bind(doctor.speciality.id.to_string())
                .bind(&doctor.email)
                .bind(&doctor.phone)
                .bind(&doctor.department)
                .bind(fold_case(&doctor.first_name))
                .bind(fold_case(&doctor.last_name))
                .bind(fold_case(&doctor.email))
                .bind(doctor.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(doctor)
        }
    }

    fn delete(&self, id: DoctorId) -> impl Future<Output = Result<(), ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)
                .map_err(still_referenced("Doctor", id.to_string()))?;

            Ok(())
        }
    }

    fn find_page(
        &self,
        predicates: &PredicateSet<DoctorField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Doctor>, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            let page: Page<Wrapper> = query::find_page(&pool, &LISTING, predicates, page).await?;
            Ok(page.map(|w| w.0))
        }
    }

    fn exists_by_email(&self, email: &str) -> impl Future<Output = Result<bool, ClinicError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let (exists,): (bool,) = sqlx::query_as(EXISTS_BY_EMAIL)
                .bind(email)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }
}
