//! Age validation gate - service layer
//!
//! The authority on whether an age input is acceptable. Presenters may
//! pre-check input, but every age passes through here before it is committed.

use std::num::{IntErrorKind, ParseIntError};

use serde::Serialize;

use crate::error::AgeRejection;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;
/// Youngest age the quiz targets
pub const TARGET_MIN: u8 = 12;
/// Oldest age the quiz targets
pub const TARGET_MAX: u8 = 15;

/// Where an accepted age falls relative to the target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Under 12: the user must confirm before continuing
    TooYoung,
    /// 12-15: advance immediately
    InRange,
    /// Over 15: the user must confirm before continuing
    OlderThanTarget,
}

impl AgeBand {
    pub fn of(age: u8) -> Self {
        if age < TARGET_MIN {
            AgeBand::TooYoung
        } else if age > TARGET_MAX {
            AgeBand::OlderThanTarget
        } else {
            AgeBand::InRange
        }
    }

    pub fn needs_confirmation(self) -> bool {
        self != AgeBand::InRange
    }

    /// Warning type as reported to analytics
    pub fn warning_type(self) -> &'static str {
        match self {
            AgeBand::TooYoung => "young",
            AgeBand::InRange => "none",
            AgeBand::OlderThanTarget => "old",
        }
    }

    /// Message shown while waiting for confirmation
    pub fn warning_message(self) -> Option<&'static str> {
        match self {
            AgeBand::TooYoung => Some(
                "בגילך הצעיר אין חובה להשתמש במוצרי טיפוח. אם תחליטי להשתמש - חשוב לעשות זאת בזהירות רבה!",
            ),
            AgeBand::OlderThanTarget => {
                Some("המבחן מיועד בעיקר לגילאי 12-15, אבל את מוזמנת להמשיך")
            }
            AgeBand::InRange => None,
        }
    }
}

/// An age accepted by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatedAge {
    pub age: u8,
    pub band: AgeBand,
}

/// Validate raw age input
///
/// # Arguments
/// - `raw`: text as typed by the user
///
/// # Returns
/// The parsed age and its band, or why it was refused
pub fn validate_age(raw: &str) -> Result<ValidatedAge, AgeRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AgeRejection::Empty);
    }
    let value: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
        // too large for i64 but still an integer
        IntErrorKind::PosOverflow => AgeRejection::OutOfRange(i64::MAX),
        IntErrorKind::NegOverflow => AgeRejection::OutOfRange(i64::MIN),
        _ => AgeRejection::NotANumber,
    })?;
    validate_age_value(value)
}

/// Validate an age the caller already holds as a number
pub fn validate_age_value(value: i64) -> Result<ValidatedAge, AgeRejection> {
    if !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(AgeRejection::OutOfRange(value));
    }
    // range-checked above
    let age = value as u8;
    Ok(ValidatedAge {
        age,
        band: AgeBand::of(age),
    })
}
