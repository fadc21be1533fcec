use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, ProductId, Rating, ReviewId};

/// A customer's rating of a product. At most one exists per (user, product).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Name of the reviewed product.
    pub product_name: String,
    pub user_id: AccountId,
    /// Username of the reviewer.
    pub author: String,
    pub subject: String,
    pub review: String,
    pub rating: Rating,
    pub ip: String,
    /// Approved reviews are shown on the storefront.
    pub status: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Review`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: AccountId,
    pub subject: String,
    pub review: String,
    pub rating: Rating,
    pub ip: String,
    pub status: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields overwritten when a customer resubmits a review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub subject: String,
    pub review: String,
    pub rating: Rating,
    pub ip: String,
    pub updated_at: NaiveDateTime,
}

/// Aggregate of approved ratings for one product.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let sum: i32 = reviews.iter().map(|r| r.rating.get()).sum();
        Self {
            count: reviews.len(),
            average: f64::from(sum) / reviews.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn review(rating: i32) -> Review {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Review {
            id: ReviewId::new(1).unwrap(),
            product_id: ProductId::new(1).unwrap(),
            product_name: "Runner".into(),
            user_id: AccountId::new(1).unwrap(),
            author: "alice".into(),
            subject: "Nice".into(),
            review: String::new(),
            rating: Rating::new(rating).unwrap(),
            ip: "127.0.0.1".into(),
            status: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summary_of_no_reviews_is_zero() {
        assert_eq!(RatingSummary::from_reviews(&[]), RatingSummary::default());
    }

    #[test]
    fn summary_averages_ratings() {
        let summary = RatingSummary::from_reviews(&[review(5), review(4), review(3)]);
        assert_eq!(summary.count, 3);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
    }
}
