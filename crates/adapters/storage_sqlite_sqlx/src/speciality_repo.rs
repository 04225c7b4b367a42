//! `SQLite` implementation of [`SpecialityRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use clinic_app::ports::SpecialityRepository;
use clinic_domain::error::ClinicError;
use clinic_domain::id::SpecialityId;
use clinic_domain::speciality::Speciality;

use crate::codec;
use crate::error::StorageError;

struct Wrapper(Speciality);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(Speciality::new(
            codec::decode_text(&id)?,
            row.try_get::<String, _>("description")?,
        )))
    }
}

const SELECT_BY_ID: &str = "SELECT id, description FROM specialities WHERE id = ?";

/// `SQLite`-backed, read-only speciality repository.
#[derive(Clone)]
pub struct SqliteSpecialityRepository {
    pool: SqlitePool,
}

impl SqliteSpecialityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SpecialityRepository for SqliteSpecialityRepository {
    fn get_by_id(
        &self,
        id: SpecialityId,
    ) -> impl Future<Output = Result<Option<Speciality>, ClinicError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }
}
