//! JSON REST handlers for doctors.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};
use clinic_domain::doctor::{Doctor, DoctorProfile};
use clinic_domain::error::{BadRequestError, ClinicError};
use clinic_domain::filter::DoctorFilter;
use clinic_domain::id::{DoctorId, SpecialityId};

use super::{PageParams, PageResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::state::AppState;

/// Request body for creating or replacing a doctor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub speciality_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

impl DoctorRequest {
    fn into_profile(self) -> Result<DoctorProfile, ApiError> {
        let mut builder = DoctorProfile::builder().phone(self.phone);
        if let Some(first_name) = self.first_name {
            builder = builder.first_name(first_name);
        }
        if let Some(last_name) = self.last_name {
            builder = builder.last_name(last_name);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(raw) = self.speciality_id {
            let speciality_id: SpecialityId = raw
                .parse()
                .map_err(|_| ClinicError::from(BadRequestError::UnknownSpeciality(raw.clone())))?;
            builder = builder.speciality_id(speciality_id);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        if let Some(department) = self.department {
            builder = builder.department(department);
        }
        Ok(builder.build()?)
    }
}

/// Query parameters of the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub speciality: Option<String>,
}

impl DoctorQuery {
    fn into_filter(self) -> Result<DoctorFilter, ApiError> {
        let page = PageParams {
            page_number: self.page_number,
            page_size: self.page_size,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
        }
        .to_request()?;
        Ok(DoctorFilter {
            page,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            speciality: self.speciality,
        })
    }
}

/// A doctor as returned to clients, with the speciality flattened to its name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub id: DoctorId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub speciality: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            first_name: doctor.first_name,
            last_name: doctor.last_name,
            title: doctor.title,
            speciality: doctor.speciality.description,
            email: doctor.email,
            phone: doctor.phone,
            department: doctor.department,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PageResponse<DoctorResponse>>),
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
    Ok(Json<DoctorResponse>),
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
    Created(Json<DoctorResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => {
                let location = format!("/v1/doctors/{}", json.id);
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

/// `GET /v1/doctors`
pub async fn list<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiQuery(query): ApiQuery<DoctorQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let filter = query.into_filter()?;
    let page = state.doctor_service.list_doctors(&filter).await?;
    Ok(ListResponse::Ok(Json(PageResponse::from_page(
        page,
        DoctorResponse::from,
    ))))
}

/// `GET /v1/doctors/{id}`
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
    let doctor_id: DoctorId = parse_id("id", &id)?;
    let doctor = state.doctor_service.get_doctor(doctor_id).await?;
    Ok(GetResponse::Ok(Json(doctor.into())))
}

/// `POST /v1/doctors`
pub async fn create<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiJson(req): ApiJson<DoctorRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let profile = req.into_profile()?;
    let created = state.doctor_service.create_doctor(profile).await?;
    Ok(CreateResponse::Created(Json(created.into())))
}

/// `PUT /v1/doctors/{id}`
pub async fn update<DR, SR, PR, AR>(
    State(state): State<AppState<DR, SR, PR, AR>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<DoctorRequest>,
) -> Result<GetResponse, ApiError>
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    let doctor_id: DoctorId = parse_id("id", &id)?;
    let profile = req.into_profile()?;
    let updated = state.doctor_service.update_doctor(doctor_id, profile).await?;
    Ok(GetResponse::Ok(Json(updated.into())))
}

/// `DELETE /v1/doctors/{id}`
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
    let doctor_id: DoctorId = parse_id("id", &id)?;
    state.doctor_service.delete_doctor(doctor_id).await?;
    Ok(DeleteResponse::NoContent)
}
