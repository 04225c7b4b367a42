//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod appointments;
#[allow(clippy::missing_errors_doc)]
pub mod doctors;
#[allow(clippy::missing_errors_doc)]
pub mod patients;

use axum::Router;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};
use clinic_domain::page::{DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, Page, PageRequest, SortDirection};

use crate::error::ApiError;
use crate::extract::parse_param;
use crate::state::AppState;

/// Build the `/v1` sub-router.
pub fn routes<DR, SR, PR, AR>() -> Router<AppState<DR, SR, PR, AR>>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    Router::new()
        // Doctors
        .route(
            "/doctors",
            get(doctors::list::<DR, SR, PR, AR>).post(doctors::create::<DR, SR, PR, AR>),
        )
        .route(
            "/doctors/{id}",
            get(doctors::get::<DR, SR, PR, AR>)
                .put(doctors::update::<DR, SR, PR, AR>)
                .delete(doctors::delete::<DR, SR, PR, AR>),
        )
        // Patients
        .route(
            "/patients",
            get(patients::list::<DR, SR, PR, AR>).post(patients::create::<DR, SR, PR, AR>),
        )
        .route(
            "/patients/{id}",
            get(patients::get::<DR, SR, PR, AR>)
                .put(patients::update::<DR, SR, PR, AR>)
                .delete(patients::delete::<DR, SR, PR, AR>),
        )
        // Appointments
        .route(
            "/patients/{id}/appointments",
            get(appointments::list::<DR, SR, PR, AR>)
                .post(appointments::create::<DR, SR, PR, AR>),
        )
        .route(
            "/patients/{id}/appointments/{appointment_id}",
            get(appointments::get::<DR, SR, PR, AR>)
                .put(appointments::update::<DR, SR, PR, AR>)
                .delete(appointments::delete::<DR, SR, PR, AR>),
        )
        .route(
            "/patients/{id}/appointments/{appointment_id}/cancel",
            post(appointments::cancel::<DR, SR, PR, AR>),
        )
}

/// Pagination parameters common to every listing, as raw query values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl PageParams {
    fn to_request(&self) -> Result<PageRequest, ApiError> {
        let page_number = parse_param("pageNumber", self.page_number.as_deref())?.unwrap_or(0);
        let page_size =
            parse_param("pageSize", self.page_size.as_deref())?.unwrap_or(DEFAULT_PAGE_SIZE);
        let sort_direction: SortDirection =
            parse_param("sortDirection", self.sort_direction.as_deref())?.unwrap_or_default();
        let sort_by = self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY);

        Ok(PageRequest::new(page_number, page_size)?.with_sort(sort_by, sort_direction))
    }
}

/// One page of a listing as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(f);
        Self {
            items: page.items,
            total: page.total,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages,
        }
    }
}
