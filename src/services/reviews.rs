use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::review::{NewReview, ReviewUpdate};
use crate::domain::types::{ProductId, ReviewId};
use crate::forms::reviews::ReviewFormPayload;
use crate::repository::{ProductReader, RepositoryError, ReviewReader, ReviewWriter};
use crate::services::{ServiceError, ServiceResult};

/// What [`submit_review`] did with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Created,
    Updated,
}

impl ReviewOutcome {
    /// Flash message shown to the reviewer.
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Thank you! Your review has been submitted.",
            Self::Updated => "Thank you! Your review has been updated.",
        }
    }
}

/// Create or overwrite the user's review of a product.
///
/// Each user keeps at most one review per product. A concurrent submission
/// that loses the insert race is applied as an update instead.
pub fn submit_review<R>(
    product_id: i32,
    payload: ReviewFormPayload,
    ip: &str,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ReviewOutcome>
where
    R: ProductReader + ReviewReader + ReviewWriter,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_product_by_id(product_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product {product_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let now = Utc::now().naive_utc();
    let update = ReviewUpdate {
        subject: payload.subject,
        review: payload.review,
        rating: payload.rating,
        ip: ip.to_string(),
        updated_at: now,
    };

    let existing = match repo.get_review(user.id, product_id) {
        Ok(existing) => existing,
        Err(e) => {
            log::error!("Failed to get review of product {product_id} by {}: {e}", user.id);
            return Err(ServiceError::Internal);
        }
    };

    if let Some(review) = existing {
        overwrite_review(review.id, &update, repo)?;
        log::info!("User {} updated review {} of product {product_id}", user.id, review.id);
        return Ok(ReviewOutcome::Updated);
    }

    let new_review = NewReview {
        product_id,
        user_id: user.id,
        subject: update.subject.clone(),
        review: update.review.clone(),
        rating: update.rating,
        ip: update.ip.clone(),
        status: true,
        created_at: now,
        updated_at: now,
    };

    match repo.create_review(&new_review) {
        Ok(_) => {
            log::info!("User {} reviewed product {product_id}", user.id);
            Ok(ReviewOutcome::Created)
        }
        Err(RepositoryError::Conflict(_)) => {
            let review = match repo.get_review(user.id, product_id) {
                Ok(Some(review)) => review,
                Ok(None) => return Err(ServiceError::Internal),
                Err(e) => {
                    log::error!("Failed to reload conflicting review: {e}");
                    return Err(ServiceError::Internal);
                }
            };
            overwrite_review(review.id, &update, repo)?;
            log::info!("User {} updated review {} after a concurrent insert", user.id, review.id);
            Ok(ReviewOutcome::Updated)
        }
        Err(e) => {
            log::error!("Failed to create review of product {product_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn overwrite_review<R: ReviewWriter>(
    id: ReviewId,
    update: &ReviewUpdate,
    repo: &R,
) -> ServiceResult<()> {
    match repo.update_review(id, update) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update review {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::{NewReview, Review};
    use crate::domain::types::{AccountId, Rating};
    use crate::repository::test::{TestRepository, category, product};
    use crate::repository::{RepositoryResult, ReviewListQuery};

    fn user(id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            id: AccountId::new(id).unwrap(),
        }
    }

    fn payload(subject: &str, rating: i32) -> ReviewFormPayload {
        ReviewFormPayload {
            subject: subject.into(),
            review: format!("{subject} body"),
            rating: Rating::new(rating).unwrap(),
        }
    }

    fn repo() -> TestRepository {
        let shoes = category(1, "Shoes");
        TestRepository::new().with_products(vec![product(1, "Runner", &shoes)])
    }

    #[test]
    fn first_submission_creates_approved_review() {
        let repo = repo();
        let outcome = submit_review(1, payload("Great", 5), "10.0.0.1", &user(1), &repo).unwrap();
        assert_eq!(outcome, ReviewOutcome::Created);

        let reviews = repo.reviews();
        assert_eq!(reviews.len(), 1);
        assert!(reviews[0].status);
        assert_eq!(reviews[0].ip, "10.0.0.1");
    }

    #[test]
    fn resubmission_updates_in_place() {
        let repo = repo();
        submit_review(1, payload("Great", 5), "10.0.0.1", &user(1), &repo).unwrap();
        let outcome = submit_review(1, payload("Meh", 2), "10.0.0.2", &user(1), &repo).unwrap();
        assert_eq!(outcome, ReviewOutcome::Updated);

        let reviews = repo.reviews();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].subject, "Meh");
        assert_eq!(reviews[0].rating.get(), 2);
        assert_eq!(reviews[0].ip, "10.0.0.2");
    }

    #[test]
    fn different_users_get_separate_reviews() {
        let repo = repo();
        submit_review(1, payload("A", 5), "ip", &user(1), &repo).unwrap();
        submit_review(1, payload("B", 4), "ip", &user(2), &repo).unwrap();
        assert_eq!(repo.reviews().len(), 2);
    }

    #[test]
    fn unknown_product_is_not_found() {
        let repo = repo();
        assert_eq!(
            submit_review(99, payload("A", 5), "ip", &user(1), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            submit_review(0, payload("A", 5), "ip", &user(1), &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    /// Hides the existing review on the first lookup, as if another request
    /// inserted it between the read and the write.
    struct RacingRepository {
        inner: TestRepository,
        lookups: std::sync::atomic::AtomicUsize,
    }

    impl ProductReader for RacingRepository {
        fn list_products(
            &self,
            query: crate::repository::ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<crate::domain::product::Product>)> {
            self.inner.list_products(query)
        }
        fn get_product_by_id(
            &self,
            id: ProductId,
        ) -> RepositoryResult<Option<crate::domain::product::Product>> {
            self.inner.get_product_by_id(id)
        }
        fn get_product_by_slugs(
            &self,
            category_slug: &crate::domain::types::Slug,
            product_slug: &crate::domain::types::Slug,
        ) -> RepositoryResult<Option<crate::domain::product::Product>> {
            self.inner.get_product_by_slugs(category_slug, product_slug)
        }
    }

    impl ReviewReader for RacingRepository {
        fn get_review(
            &self,
            user_id: AccountId,
            product_id: ProductId,
        ) -> RepositoryResult<Option<Review>> {
            let n = self
                .lookups
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == 0 {
                return Ok(None);
            }
            self.inner.get_review(user_id, product_id)
        }
        fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)> {
            self.inner.list_reviews(query)
        }
    }

    impl ReviewWriter for RacingRepository {
        fn create_review(&self, review: &NewReview) -> RepositoryResult<usize> {
            self.inner.create_review(review)
        }
        fn update_review(&self, id: ReviewId, update: &ReviewUpdate) -> RepositoryResult<usize> {
            self.inner.update_review(id, update)
        }
    }

    #[test]
    fn conflicting_insert_falls_back_to_update() {
        let inner = repo();
        submit_review(1, payload("First", 5), "ip", &user(1), &inner).unwrap();
        let racing = RacingRepository {
            inner,
            lookups: Default::default(),
        };

        let outcome = submit_review(1, payload("Second", 3), "ip", &user(1), &racing).unwrap();
        assert_eq!(outcome, ReviewOutcome::Updated);

        let reviews = racing.inner.reviews();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].subject, "Second");
    }
}
