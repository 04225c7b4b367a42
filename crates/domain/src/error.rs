//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ClinicError`]
//! via `#[from]`. The HTTP adapter maps the variants onto status codes; the
//! core never decides how an error is rendered.

use serde::Serialize;

use crate::appointment::AppointmentStatus;

/// Top-level error returned by domain logic, services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    /// One or more attributes of a payload violate domain invariants.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An id (optionally scoped by patient) does not resolve.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The requested mutation is forbidden by the current state.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A business rule on the request was violated (unknown reference, duplicate email).
    #[error(transparent)]
    BadRequest(#[from] BadRequestError),

    /// An infrastructure failure from a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A single `(attribute, message)` pair describing why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMessage {
    pub attribute: &'static str,
    pub message: String,
}

impl AttributeMessage {
    #[must_use]
    pub fn new(attribute: &'static str, message: impl Into<String>) -> Self {
        Self {
            attribute,
            message: message.into(),
        }
    }
}

/// Attribute-level validation failure, collecting every violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation Exception")]
pub struct ValidationError {
    violations: Vec<AttributeMessage>,
}

impl ValidationError {
    /// Build an error from a single violation.
    #[must_use]
    pub fn single(attribute: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![AttributeMessage::new(attribute, message)],
        }
    }

    /// All violations, in the order they were detected.
    #[must_use]
    pub fn violations(&self) -> &[AttributeMessage] {
        &self.violations
    }

    /// Whether `attribute` is among the rejected attributes.
    #[must_use]
    pub fn has(&self, attribute: &str) -> bool {
        self.violations.iter().any(|v| v.attribute == attribute)
    }
}

/// Accumulates violations while a builder checks its fields.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<AttributeMessage>);

impl Violations {
    pub(crate) fn push(&mut self, attribute: &'static str, message: impl Into<String>) {
        self.0.push(AttributeMessage::new(attribute, message));
    }

    /// Reject blank values and values longer than `max` characters.
    pub(crate) fn text(&mut self, attribute: &'static str, label: &str, value: &str, max: Option<usize>) {
        if value.trim().is_empty() {
            self.push(attribute, format!("{label} cannot be null"));
        } else if let Some(max) = max {
            if value.chars().count() > max {
                self.push(attribute, format!("{label} cannot exceed {max} characters"));
            }
        }
    }

    pub(crate) fn email(&mut self, attribute: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(attribute, format!("{label} cannot be null"));
        } else if !is_well_formed_email(value) {
            self.push(attribute, "Invalid email");
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.0 })
        }
    }
}

fn is_well_formed_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Lookup failure for an entity id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with Id {id} was not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A mutation forbidden by the state of the target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// Update/delete attempted on an appointment that left `SCHEDULED`.
    #[error(
        "Appointment cannot be {action} because it is not in the SCHEDULED state. Current status: '{status}'."
    )]
    NotScheduled {
        action: &'static str,
        status: AppointmentStatus,
    },

    /// Deletion of a row that other rows still point to.
    #[error("{entity} with Id {id} cannot be deleted because it still has appointments")]
    StillReferenced { entity: &'static str, id: String },
}

/// A request rejected by a business rule rather than by its shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadRequestError {
    #[error("There is another {entity} using the same email '{email}' informed")]
    DuplicateEmail { entity: &'static str, email: String },

    #[error("Speciality not found with id: {0}")]
    UnknownSpeciality(String),
}

/// A textual value that does not name any variant of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariantError {
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl ClinicError {
    /// Wrap any infrastructure error as [`ClinicError::Storage`].
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Human-readable name of the action blocked by [`ConflictError::NotScheduled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedAction {
    Update,
    Delete,
}

impl BlockedAction {
    #[must_use]
    pub fn past_participle(self) -> &'static str {
        match self {
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}
