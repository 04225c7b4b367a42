//! Patient: the owner of appointments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::doctor::MAX_NAME_LENGTH;
use crate::error::{ValidationError, Violations};
use crate::filter::PatientField;
use crate::id::PatientId;
use crate::query::{Queryable, Value};
use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub date_of_birth: NaiveDate,
    pub created_at: Timestamp,
}

impl Patient {
    #[must_use]
    pub fn register(profile: PatientProfile, now: Timestamp) -> Self {
        Self {
            id: PatientId::new(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            address: profile.address,
            date_of_birth: profile.date_of_birth,
            created_at: now,
        }
    }

    /// Replace every editable attribute, keeping identity and creation time.
    pub fn apply(&mut self, profile: PatientProfile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.email = profile.email;
        self.address = profile.address;
        self.date_of_birth = profile.date_of_birth;
    }
}

impl Queryable for Patient {
    type Field = PatientField;

    fn value_of(&self, field: PatientField) -> Option<Value> {
        let text = match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::Email => &self.email,
        };
        Some(Value::Text(text.clone()))
    }

    fn listing_key(&self) -> (Timestamp, uuid::Uuid) {
        (self.created_at, self.id.as_uuid())
    }
}

/// Editable attributes of a patient, as submitted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub date_of_birth: NaiveDate,
}

impl PatientProfile {
    #[must_use]
    pub fn builder() -> PatientProfileBuilder {
        PatientProfileBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct PatientProfileBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    address: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl PatientProfileBuilder {
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
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    /// Consume the builder, validate, and return a [`PatientProfile`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing, blank, overlong
    /// or malformed attribute.
    pub fn build(self) -> Result<PatientProfile, ValidationError> {
        let mut violations = Violations::default();
        let first_name = self.first_name.unwrap_or_default();
        let last_name = self.last_name.unwrap_or_default();
        let email = self.email.unwrap_or_default();

        violations.text("firstName", "Patient's first name", &first_name, Some(MAX_NAME_LENGTH));
        violations.text("lastName", "Patient's last name", &last_name, Some(MAX_NAME_LENGTH));
        violations.email("email", "Patient's email", &email);
        if self.date_of_birth.is_none() {
            violations.push("dateOfBirth", "Patient's date of birth cannot be null");
        }
        violations.finish()?;

        Ok(PatientProfile {
            first_name,
            last_name,
            email,
            address: self.address,
            date_of_birth: self.date_of_birth.unwrap_or_default(),
        })
    }
}
