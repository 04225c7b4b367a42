//! Doctor: a practitioner appointments are booked with.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violations};
use crate::filter::DoctorField;
use crate::id::{DoctorId, SpecialityId};
use crate::query::{Queryable, Value};
use crate::speciality::Speciality;
use crate::time::Timestamp;

/// Longest accepted first or last name.
pub const MAX_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: DoctorId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub speciality: Speciality,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub created_at: Timestamp,
}

impl Doctor {
    /// Create a doctor from a validated profile and its resolved speciality.
    #[must_use]
    pub fn register(profile: DoctorProfile, speciality: Speciality, now: Timestamp) -> Self {
        Self {
            id: DoctorId::new(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            title: profile.title,
            speciality,
            email: profile.email,
            phone: profile.phone,
            department: profile.department,
            created_at: now,
        }
    }

    /// Replace every editable attribute, keeping identity and creation time.
    pub fn apply(&mut self, profile: DoctorProfile, speciality: Speciality) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.title = profile.title;
        self.speciality = speciality;
        self.email = profile.email;
        self.phone = profile.phone;
        self.department = profile.department;
    }
}

impl Queryable for Doctor {
    type Field = DoctorField;

    fn value_of(&self, field: DoctorField) -> Option<Value> {
        let text = match field {
            DoctorField::FirstName => &self.first_name,
            DoctorField::LastName => &self.last_name,
            DoctorField::Email => &self.email,
            DoctorField::Speciality => &self.speciality.description,
        };
        Some(Value::Text(text.clone()))
    }

    fn listing_key(&self) -> (Timestamp, uuid::Uuid) {
        (self.created_at, self.id.as_uuid())
    }
}

/// Editable attributes of a doctor, as submitted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorProfile {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub speciality_id: SpecialityId,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
}

impl DoctorProfile {
    #[must_use]
    pub fn builder() -> DoctorProfileBuilder {
        DoctorProfileBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct DoctorProfileBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    title: Option<String>,
    speciality_id: Option<SpecialityId>,
    email: Option<String>,
    phone: Option<String>,
    department: Option<String>,
}

impl DoctorProfileBuilder {
    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn speciality_id(mut self, speciality_id: SpecialityId) -> Self {
        self.speciality_id = Some(speciality_id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Consume the builder, validate, and return a [`DoctorProfile`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing, blank, overlong
    /// or malformed attribute.
    pub fn build(self) -> Result<DoctorProfile, ValidationError> {
        let mut violations = Violations::default();
        let first_name = self.first_name.unwrap_or_default();
        let last_name = self.last_name.unwrap_or_default();
        let title = self.title.unwrap_or_default();
        let email = self.email.unwrap_or_default();
        let department = self.department.unwrap_or_default();

        violations.text("firstName", "Doctor's first name", &first_name, Some(MAX_NAME_LENGTH));
        violations.text("lastName", "Doctor's last name", &last_name, Some(MAX_NAME_LENGTH));
        violations.text("title", "Doctor's title", &title, None);
        if self.speciality_id.is_none() {
            violations.push("specialityId", "Doctor's speciality id cannot be null");
        }
        violations.email("email", "Doctor's email", &email);
        violations.text("department", "Doctor's department", &department, None);
        violations.finish()?;

        Ok(DoctorProfile {
            first_name,
            last_name,
            title,
            speciality_id: self.speciality_id.unwrap_or_default(),
            email,
            phone: self.phone,
            department,
        })
    }
}
