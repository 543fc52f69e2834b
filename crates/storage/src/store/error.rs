#![forbid(unsafe_code)]

use lx_core::error::DomainError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    Json(serde_json::Error),
    Domain(DomainError),
    InvalidInput(&'static str),
    NotFound {
        entity: &'static str,
        id: String,
    },
    AlreadyExists {
        entity: &'static str,
        id: String,
    },
    PreconditionFailed {
        reason: String,
    },
    InvariantViolation {
        invariant: &'static str,
        detail: String,
    },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Sql(_) => "INTERNAL",
            Self::Json(_) => "INVALID_JSON",
            Self::Domain(_) | Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::PreconditionFailed { .. } => "PRECONDITION_FAILED",
            Self::InvariantViolation { .. } => "INVARIANT_VIOLATION",
        }
    }

    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyExists { .. } => {
                Some("use a different identifier or reset the store first")
            }
            Self::NotFound { .. } => Some("load the norm before referencing its components"),
            Self::PreconditionFailed { .. } => {
                Some("apply amendments in non-decreasing date order against a loaded norm")
            }
            Self::InvariantViolation { .. } => {
                Some("the transaction was rolled back; run `verify` to inspect the graph")
            }
            Self::Domain(_) | Self::InvalidInput(_) | Self::Json(_) => {
                Some("check the input payload")
            }
            Self::Io(_) | Self::Sql(_) => None,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Json(err) => write!(f, "json: {err}"),
            Self::Domain(err) => write!(f, "domain: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AlreadyExists { entity, id } => write!(f, "{entity} already exists: {id}"),
            Self::PreconditionFailed { reason } => write!(f, "precondition failed: {reason}"),
            Self::InvariantViolation { invariant, detail } => {
                write!(f, "invariant {invariant} violated: {detail}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}
