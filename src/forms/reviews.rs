use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Rating, TypeConstraintError};

/// Review submitted from the product detail page.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub review: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewFormPayload {
    pub subject: String,
    pub review: String,
    pub rating: Rating,
}

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("Review form validation failed: {0}")]
    Validation(String),
    #[error("Review form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ReviewFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ReviewFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ReviewForm> for ReviewFormPayload {
    type Error = ReviewFormError;

    fn try_from(value: ReviewForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let subject = value.subject.trim();
        if subject.is_empty() {
            return Err(TypeConstraintError::EmptyString("subject").into());
        }
        Ok(Self {
            subject: subject.to_string(),
            review: value.review.trim().to_string(),
            rating: Rating::new(value.rating)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(subject: &str, review: &str, rating: i32) -> ReviewForm {
        ReviewForm {
            subject: subject.into(),
            review: review.into(),
            rating,
        }
    }

    #[test]
    fn accepts_valid_review() {
        let payload = ReviewFormPayload::try_from(form(" Great ", " Fits well ", 5)).unwrap();
        assert_eq!(payload.subject, "Great");
        assert_eq!(payload.review, "Fits well");
        assert_eq!(payload.rating.get(), 5);
    }

    #[test]
    fn rejects_out_of_range_rating() {
        assert!(matches!(
            ReviewFormPayload::try_from(form("Bad", "", 0)),
            Err(ReviewFormError::Validation(_))
        ));
        assert!(matches!(
            ReviewFormPayload::try_from(form("Bad", "", 6)),
            Err(ReviewFormError::Validation(_))
        ));
    }

    #[test]
    fn rejects_blank_subject() {
        assert!(ReviewFormPayload::try_from(form("", "text", 3)).is_err());
        assert!(matches!(
            ReviewFormPayload::try_from(form("   ", "text", 3)),
            Err(ReviewFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn rejects_overlong_fields() {
        assert!(ReviewFormPayload::try_from(form(&"s".repeat(101), "", 3)).is_err());
        assert!(ReviewFormPayload::try_from(form("Ok", &"r".repeat(501), 3)).is_err());
    }
}
