//! Speciality: reference data describing a doctor's field of practice.
//!
//! The set of specialities is seeded by the storage schema; the service never
//! creates them, it only resolves them by id.

use serde::{Deserialize, Serialize};

use crate::id::SpecialityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub id: SpecialityId,
    pub description: String,
}

impl Speciality {
    #[must_use]
    pub fn new(id: SpecialityId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}
