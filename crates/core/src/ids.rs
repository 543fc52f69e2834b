#![forbid(unsafe_code)]

/// Path-encoded component handle, e.g. `tit_08_cap_03_sec_01_art_214_art_214`.
///
/// The id is the only stable handle the engine has onto a component, so the
/// accepted alphabet is deliberately narrow.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, ComponentIdError> {
        let value = value.into();
        validate_component_id(&value)?;
        Ok(Self(value))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentIdError {
    Empty,
    TooLong,
    InvalidFirstChar,
    InvalidChar { ch: char, index: usize },
}

impl std::fmt::Display for ComponentIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "component id must not be empty"),
            Self::TooLong => write!(f, "component id exceeds 256 chars"),
            Self::InvalidFirstChar => {
                write!(f, "component id must start with an ascii alphanumeric")
            }
            Self::InvalidChar { ch, index } => {
                write!(f, "component id has invalid char {ch:?} at index {index}")
            }
        }
    }
}

impl std::error::Error for ComponentIdError {}

fn validate_component_id(value: &str) -> Result<(), ComponentIdError> {
    if value.is_empty() {
        return Err(ComponentIdError::Empty);
    }
    if value.len() > 256 {
        return Err(ComponentIdError::TooLong);
    }
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(ComponentIdError::Empty);
    };
    if !first.is_ascii_alphanumeric() {
        return Err(ComponentIdError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate() {
        if index == 0 {
            continue;
        }
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.') {
            continue;
        }
        return Err(ComponentIdError::InvalidChar { ch, index });
    }
    Ok(())
}
