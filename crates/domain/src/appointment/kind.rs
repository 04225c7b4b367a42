use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariantError;

/// Reason for an appointment, chosen at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    AnnualPhysical,
    Consultation,
    FollowUp,
    Vaccination,
    EmergencyVisit,
    SickVisit,
    TherapySession,
    PreOperativeCheckup,
    PosOperativeCheckup,
}

impl AppointmentType {
    pub const ALL: [Self; 9] = [
        Self::AnnualPhysical,
        Self::Consultation,
        Self::FollowUp,
        Self::Vaccination,
        Self::EmergencyVisit,
        Self::SickVisit,
        Self::TherapySession,
        Self::PreOperativeCheckup,
        Self::PosOperativeCheckup,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnnualPhysical => "ANNUAL_PHYSICAL",
            Self::Consultation => "CONSULTATION",
            Self::FollowUp => "FOLLOW_UP",
            Self::Vaccination => "VACCINATION",
            Self::EmergencyVisit => "EMERGENCY_VISIT",
            Self::SickVisit => "SICK_VISIT",
            Self::TherapySession => "THERAPY_SESSION",
            Self::PreOperativeCheckup => "PRE_OPERATIVE_CHECKUP",
            Self::PosOperativeCheckup => "POS_OPERATIVE_CHECKUP",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariantError::new("appointment type", s))
    }
}
