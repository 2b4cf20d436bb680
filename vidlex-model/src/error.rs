use std::fmt::{self, Display};

/// Errors produced by model parsing and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownProficiencyLevel(String),
    UnknownSpeechSpeed(String),
    UnknownModerationFilter(String),
    InvalidTimeWindow { start: String, end: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownProficiencyLevel(value) => {
                write!(f, "unknown proficiency level: {value}")
            }
            ModelError::UnknownSpeechSpeed(value) => {
                write!(f, "unknown speech speed: {value}")
            }
            ModelError::UnknownModerationFilter(value) => {
                write!(f, "unknown moderation filter: {value}")
            }
            ModelError::InvalidTimeWindow { start, end } => {
                write!(f, "invalid time window: start {start} > end {end}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
