//! In-memory repositories backing the service tests.
//!
//! Clones share the same store so several services can observe each other's
//! writes, as they would through a shared database pool.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use clinic_domain::appointment::Appointment;
use clinic_domain::doctor::Doctor;
use clinic_domain::error::ClinicError;
use clinic_domain::filter::{AppointmentField, DoctorField, PatientField};
use clinic_domain::id::{AppointmentId, DoctorId, PatientId, SpecialityId};
use clinic_domain::page::{Page, PageRequest};
use clinic_domain::patient::Patient;
use clinic_domain::query::{PredicateSet, select_page};
use clinic_domain::speciality::Speciality;

use crate::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, SpecialityRepository,
};

pub(crate) fn cardiology() -> Speciality {
    Speciality::new(SpecialityId::from_u128(1), "Cardiology")
}

pub(crate) fn neurology() -> Speciality {
    Speciality::new(SpecialityId::from_u128(2), "Neurology")
}

#[derive(Clone)]
pub(crate) struct InMemorySpecialities {
    store: Arc<Vec<Speciality>>,
}

impl Default for InMemorySpecialities {
    fn default() -> Self {
        Self {
            store: Arc::new(vec![cardiology(), neurology()]),
        }
    }
}

impl SpecialityRepository for InMemorySpecialities {
    fn get_by_id(
        &self,
        id: SpecialityId,
    ) -> impl Future<Output = Result<Option<Speciality>, ClinicError>> + Send {
        let result = self.store.iter().find(|s| s.id == id).cloned();
        async { Ok(result) }
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryDoctors {
    store: Arc<Mutex<HashMap<DoctorId, Doctor>>>,
}

impl DoctorRepository for InMemoryDoctors {
    fn create(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send {
        self.store.lock().unwrap().insert(doctor.id, doctor.clone());
        async { Ok(doctor) }
    }

    fn get_by_id(
        &self,
        id: DoctorId,
    ) -> impl Future<Output = Result<Option<Doctor>, ClinicError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn update(&self, doctor: Doctor) -> impl Future<Output = Result<Doctor, ClinicError>> + Send {
        self.store.lock().unwrap().insert(doctor.id, doctor.clone());
        async { Ok(doctor) }
    }

    fn delete(&self, id: DoctorId) -> impl Future<Output = Result<(), ClinicError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }

    fn find_page(
        &self,
        predicates: &PredicateSet<DoctorField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Doctor>, ClinicError>> + Send {
        let rows: Vec<Doctor> = self.store.lock().unwrap().values().cloned().collect();
        let result = select_page(rows, predicates, page);
        async { Ok(result) }
    }

    fn exists_by_email(&self, email: &str) -> impl Future<Output = Result<bool, ClinicError>> + Send {
        let result = self.store.lock().unwrap().values().any(|d| d.email == email);
        async move { Ok(result) }
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryPatients {
    store: Arc<Mutex<HashMap<PatientId, Patient>>>,
}

impl PatientRepository for InMemoryPatients {
    fn create(&self, patient: Patient) -> impl Future<Output = Result<Patient, ClinicError>> + Send {
        self.store.lock().unwrap().insert(patient.id, patient.clone());
        async { Ok(patient) }
    }

    fn get_by_id(
        &self,
        id: PatientId,
    ) -> impl Future<Output = Result<Option<Patient>, ClinicError>> + Send {
        let result = self.store.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn update(&self, patient: Patient) -> impl Future<Output = Result<Patient, ClinicError>> + Send {
        self.store.lock().unwrap().insert(patient.id, patient.clone());
        async { Ok(patient) }
    }

    fn delete(&self, id: PatientId) -> impl Future<Output = Result<(), ClinicError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }

    fn find_page(
        &self,
        predicates: &PredicateSet<PatientField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Patient>, ClinicError>> + Send {
        let rows: Vec<Patient> = self.store.lock().unwrap().values().cloned().collect();
        let result = select_page(rows, predicates, page);
        async { Ok(result) }
    }

    fn exists_by_email(&self, email: &str) -> impl Future<Output = Result<bool, ClinicError>> + Send {
        let result = self.store.lock().unwrap().values().any(|p| p.email == email);
        async move { Ok(result) }
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryAppointments {
    store: Arc<Mutex<HashMap<AppointmentId, Appointment>>>,
}

impl InMemoryAppointments {
    /// Overwrite a stored appointment, bypassing the lifecycle rules.
    pub(crate) fn put(&self, appointment: Appointment) {
        self.store
            .lock()
            .unwrap()
            .insert(appointment.id, appointment);
    }

    pub(crate) fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}

impl AppointmentRepository for InMemoryAppointments {
    fn create(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send {
        self.put(appointment.clone());
        async { Ok(appointment) }
    }

    fn get_by_id_for_patient(
        &self,
        id: AppointmentId,
        patient_id: PatientId,
    ) -> impl Future<Output = Result<Option<Appointment>, ClinicError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .get(&id)
            .filter(|a| a.patient_id == patient_id)
            .cloned();
        async { Ok(result) }
    }

    fn update(
        &self,
        appointment: Appointment,
    ) -> impl Future<Output = Result<Appointment, ClinicError>> + Send {
        self.put(appointment.clone());
        async { Ok(appointment) }
    }

    fn delete(&self, id: AppointmentId) -> impl Future<Output = Result<(), ClinicError>> + Send {
        self.store.lock().unwrap().remove(&id);
        async { Ok(()) }
    }

    fn find_page(
        &self,
        predicates: &PredicateSet<AppointmentField>,
        page: &PageRequest,
    ) -> impl Future<Output = Result<Page<Appointment>, ClinicError>> + Send {
        let rows: Vec<Appointment> = self.store.lock().unwrap().values().cloned().collect();
        let result = select_page(rows, predicates, page);
        async { Ok(result) }
    }
}
