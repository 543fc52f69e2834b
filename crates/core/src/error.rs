#![forbid(unsafe_code)]

use crate::dates::DateError;
use crate::ids::ComponentIdError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    ComponentId(ComponentIdError),
    Date(DateError),
    UnknownComponentType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComponentId(err) => write!(f, "component id: {err}"),
            Self::Date(err) => write!(f, "date: {err}"),
            Self::UnknownComponentType(value) => {
                write!(f, "unknown component type: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<ComponentIdError> for DomainError {
    fn from(value: ComponentIdError) -> Self {
        Self::ComponentId(value)
    }
}

impl From<DateError> for DomainError {
    fn from(value: DateError) -> Self {
        Self::Date(value)
    }
}
