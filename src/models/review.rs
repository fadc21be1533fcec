use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{
    NewReview as DomainNewReview, Review as DomainReview, ReviewUpdate as DomainReviewUpdate,
};
use crate::domain::types::{Rating, TypeConstraintError};

/// Diesel model representing the `review_ratings` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::review_ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub subject: String,
    pub review: String,
    pub rating: i32,
    pub ip: String,
    pub status: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Review`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::review_ratings)]
pub struct NewReview<'a> {
    pub product_id: i32,
    pub user_id: i32,
    pub subject: &'a str,
    pub review: &'a str,
    pub rating: i32,
    pub ip: &'a str,
    pub status: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied when a review is resubmitted.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::review_ratings)]
pub struct ReviewChangeset<'a> {
    pub subject: &'a str,
    pub review: &'a str,
    pub rating: i32,
    pub ip: &'a str,
    pub updated_at: NaiveDateTime,
}

/// Review joined with the product name and the reviewer's username.
pub type ReviewRow = (Review, String, String);

impl TryFrom<ReviewRow> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from((review, product_name, author): ReviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: review.id.try_into()?,
            product_id: review.product_id.try_into()?,
            product_name,
            user_id: review.user_id.try_into()?,
            author,
            subject: review.subject,
            review: review.review,
            rating: Rating::new(review.rating)?,
            ip: review.ip,
            status: review.status,
            created_at: review.created_at,
            updated_at: review.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(review: &'a DomainNewReview) -> Self {
        Self {
            product_id: review.product_id.get(),
            user_id: review.user_id.get(),
            subject: review.subject.as_str(),
            review: review.review.as_str(),
            rating: review.rating.get(),
            ip: review.ip.as_str(),
            status: review.status,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl<'a> From<&'a DomainReviewUpdate> for ReviewChangeset<'a> {
    fn from(update: &'a DomainReviewUpdate) -> Self {
        Self {
            subject: update.subject.as_str(),
            review: update.review.as_str(),
            rating: update.rating.get(),
            ip: update.ip.as_str(),
            updated_at: update.updated_at,
        }
    }
}
