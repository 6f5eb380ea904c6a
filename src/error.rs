//! Quiz error types

use thiserror::Error;

use crate::workflow::Screen;

/// Quiz error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// Age input rejected by the validation gate
    #[error("invalid age: {0}")]
    InvalidAge(#[from] AgeRejection),

    /// A product carries a status outside the three known verdicts
    #[error("data integrity error: product '{product_id}' has unrecognized status '{status}'")]
    DataIntegrity { product_id: String, status: String },

    /// Operation is not allowed on the current screen
    #[error("'{action}' is not allowed on the {screen} screen")]
    InvalidTransition { screen: Screen, action: &'static str },

    /// `confirm_continue` without a pending age warning
    #[error("no age warning is waiting for confirmation")]
    NothingToConfirm,

    /// A different age was submitted after one was already committed
    #[error("age {committed} is already committed for this session (attempted {attempted})")]
    AgeLocked { committed: u8, attempted: u8 },

    /// Catalog construction error
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Why the age gate refused an input
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AgeRejection {
    /// Nothing was entered
    #[error("age is empty")]
    Empty,
    /// Input is not a base-10 integer
    #[error("age is not a whole number")]
    NotANumber,
    /// Integer outside [1, 120]
    #[error("age {0} is outside 1-120")]
    OutOfRange(i64),
}

/// Catalog errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share one id
    #[error("duplicate product id '{0}'")]
    DuplicateId(String),
    /// A product has an empty id
    #[error("product '{name}' has an empty id")]
    EmptyId { name: String },
}

// ========== Convenience constructors ==========

impl QuizError {
    pub fn invalid_transition(screen: Screen, action: &'static str) -> Self {
        QuizError::InvalidTransition { screen, action }
    }

    pub fn data_integrity(product_id: impl Into<String>, status: impl Into<String>) -> Self {
        QuizError::DataIntegrity {
            product_id: product_id.into(),
            status: status.into(),
        }
    }

    /// True for errors caused by user input, which the presenter should re-prompt on
    pub fn is_user_error(&self) -> bool {
        matches!(self, QuizError::InvalidAge(_) | QuizError::AgeLocked { .. })
    }
}

// ========== Result type alias ==========

/// Quiz result type
pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_rejection_converts_into_quiz_error() {
        let err: QuizError = AgeRejection::OutOfRange(130).into();
        assert_eq!(err, QuizError::InvalidAge(AgeRejection::OutOfRange(130)));
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "invalid age: age 130 is outside 1-120");
    }

    #[test]
    fn test_data_integrity_is_not_a_user_error() {
        let err = QuizError::data_integrity("p-9", "maybe");
        assert!(!err.is_user_error());
        assert!(err.to_string().contains("'p-9'"));
        assert!(err.to_string().contains("'maybe'"));
    }

    #[test]
    fn test_invalid_transition_message_names_screen() {
        let err = QuizError::invalid_transition(Screen::Cta, "back");
        assert_eq!(err.to_string(), "'back' is not allowed on the cta screen");
    }
}
