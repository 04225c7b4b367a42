//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use clinic_app::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the versioned API under `/v1` next to a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<DR, SR, PR, AR>(state: AppState<DR, SR, PR, AR>) -> Router
where
    DR: DoctorRepository + Send + Sync + 'static,
    SR: SpecialityRepository + Send + Sync + 'static,
    PR: PatientRepository + Send + Sync + 'static,
    AR: AppointmentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use clinic_app::services::appointment_service::AppointmentService;
    use clinic_app::services::doctor_service::DoctorService;
    use clinic_app::services::patient_service::PatientService;
    use clinic_domain::appointment::{Appointment, AppointmentStatus, Booking};
    use clinic_domain::doctor::{Doctor, DoctorProfile};
    use clinic_domain::error::ClinicError;
    use clinic_domain::filter::{AppointmentField, DoctorField, PatientField};
    use clinic_domain::id::{AppointmentId, DoctorId, PatientId, SpecialityId};
    use clinic_domain::page::{Page, PageRequest};
    use clinic_domain::patient::{Patient, PatientProfile};
    use clinic_domain::query::PredicateSet;
    use clinic_domain::speciality::Speciality;
    use clinic_domain::time::now;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Stubs answering every lookup with a record when `known`, or nothing.
    #[derive(Clone, Copy)]
    struct StubDoctors {
        known: bool,
    }
    struct StubSpecialities;
    #[derive(Clone, Copy)]
    struct StubPatients {
        known: bool,
    }
    struct StubAppointments {
        status: AppointmentStatus,
    }

    fn cardiology() -> Speciality {
        Speciality::new(SpecialityId::from_u128(1), "Cardiology")
    }

    fn doctor() -> Doctor {
        let profile = DoctorProfile::builder()
            .first_name("John")
            .last_name("Foreman")
            .title("Dr.")
            .speciality_id(SpecialityId::from_u128(1))
            .email("john.foreman@example.com")
            .department("Primary Care")
            .build()
            .unwrap();
        Doctor::register(profile, cardiology(), now())
    }

    fn patient() -> Patient {
        let profile = PatientProfile::builder()
            .first_name("Jane")
            .last_name("Smith")
            .email("jane.smith@example.com")
            .date_of_birth(chrono::NaiveDate::from_ymd_opt(1982, 9, 25).unwrap())
            .build()
            .unwrap();
        Patient::register(profile, now())
    }

    impl clinic_app::ports::SpecialityRepository for StubSpecialities {
        async fn get_by_id(&self, id: SpecialityId) -> Result<Option<Speciality>, ClinicError> {
            Ok(Some(Speciality::new(id, "Cardiology")))
        }
    }

    impl clinic_app::ports::DoctorRepository for StubDoctors {
        async fn create(&self, doctor: Doctor) -> Result<Doctor, ClinicError> {
            Ok(doctor)
        }
        async fn get_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, ClinicError> {
            Ok(self.known.then(|| Doctor { id, ..doctor() }))
        }
        async fn update(&self, doctor: Doctor) -> Result<Doctor, ClinicError> {
            Ok(doctor)
        }
        async fn delete(&self, _id: DoctorId) -> Result<(), ClinicError> {
            Ok(())
        }
        async fn find_page(
            &self,
            _predicates: &PredicateSet<DoctorField>,
            page: &PageRequest,
        ) -> Result<Page<Doctor>, ClinicError> {
            Ok(Page::new(vec![doctor()], 11, page))
        }
        async fn exists_by_email(&self, _email: &str) -> Result<bool, ClinicError> {
            Ok(false)
        }
    }

    impl clinic_app::ports::PatientRepository for StubPatients {
        async fn create(&self, patient: Patient) -> Result<Patient, ClinicError> {
            Ok(patient)
        }
        async fn get_by_id(&self, id: PatientId) -> Result<Option<Patient>, ClinicError> {
            Ok(self.known.then(|| Patient { id, ..patient() }))
        }
        async fn update(&self, patient: Patient) -> Result<Patient, ClinicError> {
            Ok(patient)
        }
        async fn delete(&self, _id: PatientId) -> Result<(), ClinicError> {
            Ok(())
        }
        async fn find_page(
            &self,
            _predicates: &PredicateSet<PatientField>,
            page: &PageRequest,
        ) -> Result<Page<Patient>, ClinicError> {
            Ok(Page::new(vec![], 0, page))
        }
        async fn exists_by_email(&self, email: &str) -> Result<bool, ClinicError> {
            Ok(email == "taken@example.com")
        }
    }

    impl clinic_app::ports::AppointmentRepository for StubAppointments {
        async fn create(&self, appointment: Appointment) -> Result<Appointment, ClinicError> {
            Ok(appointment)
        }
        async fn get_by_id_for_patient(
            &self,
            id: AppointmentId,
            patient_id: PatientId,
        ) -> Result<Option<Appointment>, ClinicError> {
            let start = chrono::NaiveDate::from_ymd_opt(2025, 9, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap();
            let mut appointment =
                Appointment::schedule(patient_id, Booking::new(DoctorId::new(), start).unwrap(), now());
            appointment.id = id;
            appointment.status = self.status;
            Ok(Some(appointment))
        }
        async fn update(&self, appointment: Appointment) -> Result<Appointment, ClinicError> {
            Ok(appointment)
        }
        async fn delete(&self, _id: AppointmentId) -> Result<(), ClinicError> {
            Ok(())
        }
        async fn find_page(
            &self,
            _predicates: &PredicateSet<AppointmentField>,
            page: &PageRequest,
        ) -> Result<Page<Appointment>, ClinicError> {
            Ok(Page::new(vec![], 0, page))
        }
    }

    fn test_state(
        known: bool,
        status: AppointmentStatus,
    ) -> AppState<StubDoctors, StubSpecialities, StubPatients, StubAppointments> {
        let doctors = StubDoctors { known };
        let patients = StubPatients { known };
        AppState::new(
            DoctorService::new(doctors, StubSpecialities),
            PatientService::new(patients),
            AppointmentService::new(StubAppointments { status }, doctors, patients),
        )
    }

    fn app() -> Router {
        build(test_state(true, AppointmentStatus::Scheduled))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_page_envelope_when_listing_doctors() {
        let (status, json) = send(app(), "GET", "/v1/doctors?pageSize=5&speciality=Cardio", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 11);
        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["items"][0]["speciality"], "Cardiology");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_page_size_is_zero() {
        let (status, json) = send(app(), "GET", "/v1/patients?pageSize=0", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["description"], "Validation Exception");
        assert_eq!(json["attributes"][0]["attribute"], "pageSize");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_path_id_is_malformed() {
        let (status, json) = send(app(), "GET", "/v1/doctors/12", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
        assert_eq!(json["attributes"][0]["attribute"], "id");
    }

    #[tokio::test]
    async fn should_return_not_found_when_doctor_is_unknown() {
        let id = DoctorId::new();
        let app = build(test_state(false, AppointmentStatus::Scheduled));

        let (status, json) = send(app, "GET", &format!("/v1/doctors/{id}"), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["description"], format!("Doctor with Id {id} was not found"));
        assert!(json.get("attributes").is_none());
        assert!(json["date"].is_string());
    }

    #[tokio::test]
    async fn should_list_violations_when_doctor_body_is_empty() {
        let (status, json) = send(app(), "POST", "/v1/doctors", Some(serde_json::json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let attributes: Vec<&str> = json["attributes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["attribute"].as_str().unwrap())
            .collect();
        assert!(attributes.contains(&"firstName"));
        assert!(attributes.contains(&"specialityId"));
    }

    #[tokio::test]
    async fn should_return_created_with_location_when_patient_registered() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/patients")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({
                    "firstName": "Jane",
                    "lastName": "Smith",
                    "email": "jane.smith@example.com",
                    "dateOfBirth": "1982-09-25",
                })
                .to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(location, format!("/v1/patients/{}", json["id"].as_str().unwrap()));
        assert_eq!(json["dateOfBirth"], "1982-09-25");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_patient_email_is_taken() {
        let body = serde_json::json!({
            "firstName": "Jane",
            "lastName": "Smith",
            "email": "taken@example.com",
            "dateOfBirth": "1982-09-25",
        });

        let (status, json) = send(app(), "POST", "/v1/patients", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["description"],
            "There is another patient using the same email 'taken@example.com' informed"
        );
    }

    #[tokio::test]
    async fn should_book_one_hour_appointment() {
        let patient_id = PatientId::new();
        let body = serde_json::json!({
            "doctorId": DoctorId::new().to_string(),
            "startTime": "2025-09-10T10:00:00",
            "type": "CONSULTATION",
        });

        let (status, json) = send(
            app(),
            "POST",
            &format!("/v1/patients/{patient_id}/appointments"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "SCHEDULED");
        assert_eq!(json["endTime"], "2025-09-10T11:00:00");
        assert_eq!(json["duration"], 60);
        assert_eq!(json["type"], "CONSULTATION");
    }

    #[tokio::test]
    async fn should_return_bad_request_when_start_time_cannot_fit_a_slot() {
        let patient_id = PatientId::new();
        let body = serde_json::json!({
            "doctorId": DoctorId::new().to_string(),
            "startTime": "+262142-12-31T23:30:00",
        });

        let (status, json) = send(
            app(),
            "POST",
            &format!("/v1/patients/{patient_id}/appointments"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["attributes"][0]["attribute"], "startTime");
    }

    #[tokio::test]
    async fn should_return_conflict_when_deleting_cancelled_appointment() {
        let app = build(test_state(true, AppointmentStatus::Cancelled));
        let uri = format!(
            "/v1/patients/{}/appointments/{}",
            PatientId::new(),
            AppointmentId::new()
        );

        let (status, json) = send(app, "DELETE", &uri, None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let description = json["description"].as_str().unwrap();
        assert!(description.contains("deleted"));
        assert!(description.contains("CANCELLED"));
    }

    #[tokio::test]
    async fn should_cancel_with_reason_from_query() {
        let app = build(test_state(true, AppointmentStatus::Confirmed));
        let uri = format!(
            "/v1/patients/{}/appointments/{}/cancel?reason=Patient%20request",
            PatientId::new(),
            AppointmentId::new()
        );

        let (status, json) = send(app, "POST", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "CANCELLED");
        assert_eq!(json["cancellationReason"], "Patient request");
        assert!(json["cancellationTime"].is_string());
    }

    #[tokio::test]
    async fn should_return_no_content_when_deleting_scheduled_appointment() {
        let uri = format!(
            "/v1/patients/{}/appointments/{}",
            PatientId::new(),
            AppointmentId::new()
        );

        let (status, _) = send(app(), "DELETE", &uri, None).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
