//! JSON REST handlers for patients.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};
use clinic_domain::filter::PatientFilter;
use clinic_domain::id::PatientId;
use clinic_domain::patient::{Patient, PatientProfile};

use super::{PageParams, PageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::state::AppState;

/// Request body for creating or replacing a patient.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl PatientRequest {
    fn into_profile(self) -> Result<PatientProfile, ApiError> {
        let mut builder = PatientProfile::builder().address(self.address);
        if let Some(first_name) = self.first_name {
            builder = builder.first_name(first_name);
        }
        if let Some(last_name) = self.last_name {
            builder = builder.last_name(last_name);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            builder = builder.date_of_birth(date_of_birth);
        }
        Ok(builder.build()?)
    }
}

/// Query parameters of the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl PatientQuery {
    fn into_filter(self) -> Result<PatientFilter, ApiError> {
        let page = PageParams {
            page_number: self.page_number,
            page_size: self.page_size,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
        }
        .to_request()?;
        Ok(PatientFilter {
            page,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        })
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PageResponse<Patient>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Patient>),
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
    Created(Json<Patient>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => {
                let location = format!("/v1/patients/{}", json.id);
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

/// `GET /v1/patients`
pub async fn list<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiQuery(query): ApiQuery<PatientQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let filter = query.into_filter()?;
    let page = state.patient_service.list_patients(&filter).await?;
    Ok(ListResponse::Ok(Json(PageResponse::from_page(page, std::convert::identity))))
}

/// `GET /v1/patients/{id}`
pub async fn get<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(id): ApiPath<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let patient_id: PatientId = parse_id("id", &id)?;
    let patient = state.patient_service.get_patient(patient_id).await?;
    Ok(GetResponse::Ok(Json(patient)))
}

/// `POST /v1/patients`
pub async fn create<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let profile = req.into_profile()?;
    let created = state.patient_service.create_patient(profile).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /v1/patients/{id}`
pub async fn update<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<PatientRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let patient_id: PatientId = parse_id("id", &id)?;
    let profile = req.into_profile()?;
    let updated = state
        .patient_service
        .update_patient(patient_id, profile)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /v1/patients/{id}`
///
/// The patient's appointments are removed with it.
pub async fn delete<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(id): ApiPath<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let patient_id: PatientId = parse_id("id", &id)?;
    state.patient_service.delete_patient(patient_id).await?;
    Ok(DeleteResponse::NoContent)
}
