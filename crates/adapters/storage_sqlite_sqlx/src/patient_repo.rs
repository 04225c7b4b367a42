//! `SQLite` implementation of [`PatientRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clinic_app::ports::PatientRepository;
use clinic_domain::error::ClinicError;
use clinic_domain::filter::PatientField;
use clinic_domain::id::PatientId;
use clinic_domain::page::{Page, PageRequest};
use clinic_domain::patient::Patient;
use clinic_domain::query::{PredicateSet, fold_case};

use crate::codec;
use crate::error::StorageError;
use crate::query::{self, Column, Listing};

/// Wrapper for converting database rows into domain [`Patient`].
struct Wrapper(Patient);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Patient> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let date_of_birth: String = row.try_get("date_of_birth")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Patient {
            id: codec::decode_text(&id)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            date_of_birth: codec::decode_date(&date_of_birth)?,
            created_at: codec::decode_timestamp(&created_at)?,
        }))
    }
}

impl Column for PatientField {
    fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }

    fn folded_column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name_folded",
            Self::LastName => "last_name_folded",
            Self::Email => "email_folded",
        }
    }
}

const SELECT: &str = "SELECT * FROM patients";
const SELECT_BY_ID: &str = "SELECT * FROM patients WHERE id = ?";
const COUNT: &str = "SELECT COUNT(*) FROM patients";
const INSERT: &str = "INSERT INTO patients \
     (id, first_name, last_name, email, address, date_of_birth, created_at, \
     first_name_folded, last_name_folded, email_folded) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const UPDATE: &str = "UPDATE patients SET first_name = ?, last_name = ?, email = ?, \
     address = ?, date_of_birth = ?, \
     first_name_folded = ?, last_name_folded = ?, email_folded = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM patients WHERE id = ?";
const EXISTS_BY_EMAIL: &str = "SELECT EXISTS(SELECT 1 FROM patients WHERE email = ?)";

const LISTING: Listing = Listing {
    select: SELECT,
    count: COUNT,
    created_at: "created_at",
    id: "id",
};

/// `SQLite`-backed patient repository.
///
/// Deleting a patient cascades to its appointments through the schema.
#[derive(Clone)]
pub struct SqlitePatientRepository {
    pool: SqlitePool,
}

impl SqlitePatientRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PatientRepository for SqlitePatientRepository {
    fn create(&self, patient: Patient) -> impl Future<Output = Result<Patient, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(patient.id.to_string())
                .bind(&patient.first_name)
                .bind(&patient.last_name)
                .bind(&patient.email)
                .bind(&patient.address)
                .bind(codec::encode_date(patient.date_of_birth))
                .bind(codec::encode_timestamp(patient.created_at))
                .bind(fold_case(&patient.first_name))
                .bind(fold_case(&patient.last_name))
                .bind(fold_case(&patient.email))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(patient)
        }
    }

    fn get_by_id(
        &self,
        id: PatientId,
    ) -> impl Future<Output = Result<Option<Patient>, ClinicError>> + Send {
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

    fn update(&self, patient: Patient) -> impl Future<Output = Result<Patient, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&patient.first_name)
                .bind(&patient.last_name)
                .bind(&patient.email)
                .bind(&patient.address)
                .bind(codec::encode_date(patient.date_of_birth))
                .bind(fold_case(&patient.first_name))
                .bind(fold_case(&patient.last_name))
                .bind(fold_case(&patient.email))
                .bind(patient.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(patient)
        }
    }

    fn delete(&self, id: PatientId) -> impl Future<Output = Result<(), ClinicError>> + Send {
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
        predicates: &PredicateSet<PatientField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Patient>, ClinicError>> + Send {
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
