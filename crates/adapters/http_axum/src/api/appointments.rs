//! JSON REST handlers for the appointments a patient owns.
//!
//! Every route is nested under `/v1/patients/{id}`; an appointment
//! addressed through another patient is reported as not found.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};
use clinic_domain::appointment::{Appointment, AppointmentType, Booking};
use clinic_domain::filter::AppointmentFilter;
use clinic_domain::id::{AppointmentId, DoctorId, PatientId};
use clinic_domain::time::{self, LocalDateTime};

use super::{PageParams, PageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id, parse_param};
use crate::state::AppState;

/// Request body for booking or moving an appointment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub doctor_id: Option<String>,
    pub start_time: Option<LocalDateTime>,
    #[serde(rename = "type")]
    pub kind: Option<AppointmentType>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl AppointmentRequest {
    fn into_booking(self) -> Result<Booking, ApiError> {
        let doctor_id: DoctorId = match self.doctor_id {
            Some(raw) => parse_id("doctorId", &raw)?,
            None => return Err(ApiError::invalid("doctorId", "Doctor Id cannot be null")),
        };
        let Some(start_time) = self.start_time else {
            return Err(ApiError::invalid(
                "startTime",
                "Appointment start time cannot be null",
            ));
        };

        let mut booking = Booking::new(doctor_id, start_time)?;
        if let Some(kind) = self.kind {
            booking = booking.kind(kind);
        }
        if let Some(title) = self.title {
            booking = booking.title(title);
        }
        if let Some(description) = self.description {
            booking = booking.description(description);
        }
        Ok(booking)
    }
}

/// Query parameters of the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub doctor_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AppointmentQuery {
    fn into_filter(self) -> Result<AppointmentFilter, ApiError> {
        let doctor_id = parse_param("doctorId", self.doctor_id.as_deref())?;
        let status = parse_param("status", self.status.as_deref())?;
        let start_date = parse_date("startDate", self.start_date.as_deref())?;
        let end_date = parse_date("endDate", self.end_date.as_deref())?;
        let page = PageParams {
            page_number: self.page_number,
            page_size: self.page_size,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
        }
        .to_request()?;
        Ok(AppointmentFilter {
            page,
            doctor_id,
            status,
            start_date,
            end_date,
        })
    }
}

/// Day bounds outside the supported years would not compare correctly with stored slots.
fn parse_date(attribute: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match parse_param::<NaiveDate>(attribute, raw)? {
        Some(date) if !time::is_supported(date) => Err(ApiError::invalid(
            attribute,
            format!("Invalid value '{}'", raw.unwrap_or_default()),
        )),
        date => Ok(date),
    }
}

/// Query parameters of the cancel endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CancelQuery {
    pub reason: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PageResponse<Appointment>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update and cancel endpoints.
pub enum GetResponse {
    Ok(Json<Appointment>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Appointment>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => {
                let location = format!(
                    "/v1/patients/{}/appointments/{}",
                    json.patient_id, json.id
                );
                (StatusCode::CREATED, [(header::LOCATION, location)], json).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_scope(patient_id: &str, id: &str) -> Result<(PatientId, AppointmentId), ApiError> {
    Ok((parse_id("patientId", patient_id)?, parse_id("id", id)?))
}

/// `GET /v1/patients/{id}/appointments`
pub async fn list<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(patient_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<AppointmentQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let patient_id: PatientId = parse_id("patientId", &patient_id)?;
    let filter = query.into_filter()?;
    let page = state
        .appointment_service
        .list_appointments(patient_id, &filter)
        .await?;
    Ok(ListResponse::Ok(Json(PageResponse::from_page(
        page,
        std::convert::identity,
    ))))
}

/// `GET /v1/patients/{id}/appointments/{appointment_id}`
pub async fn get<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath((patient_id, id)): ApiPath<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let (patient_id, id) = parse_scope(&patient_id, &id)?;
    let appointment = state
        .appointment_service
        .get_appointment(id, patient_id)
        .await?;
    Ok(GetResponse::Ok(Json(appointment)))
}

/// `POST /v1/patients/{id}/appointments`
pub async fn create<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(patient_id): ApiPath<String>,
    ApiJson(req): ApiJson<AppointmentRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let patient_id: PatientId = parse_id("patientId", &patient_id)?;
    let booking = req.into_booking()?;
    let created = state
        .appointment_service
        .create_appointment(patient_id, booking)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /v1/patients/{id}/appointments/{appointment_id}`
pub async fn update<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath((patient_id, id)): ApiPath<(String, String)>,
    ApiJson(req): ApiJson<AppointmentRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let (patient_id, id) = parse_scope(&patient_id, &id)?;
    let booking = req.into_booking()?;
    let updated = state
        .appointment_service
        .update_appointment(id, patient_id, booking)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `POST /v1/patients/{id}/appointments/{appointment_id}/cancel?reason=...`
pub async fn cancel<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath((patient_id, id)): ApiPath<(String, String)>,
    ApiQuery(query): ApiQuery<CancelQuery>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let (patient_id, id) = parse_scope(&patient_id, &id)?;
    let cancelled = state
        .appointment_service
        .cancel_appointment(id, patient_id, query.reason.unwrap_or_default())
        .await?;
    Ok(GetResponse::Ok(Json(cancelled)))
}

/// `DELETE /v1/patients/{id}/appointments/{appointment_id}`
pub async fn delete<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath((patient_id, id)): ApiPath<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let (patient_id, id) = parse_scope(&patient_id, &id)?;
    state
        .appointment_service
        .delete_appointment(id, patient_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
