//! Reviews service: ratings gated on proof of purchase.
//!
//! One rating per (user, product), admitted only on proof of purchase: an
//! order line item for that pair, in any order status. A `pending` or even
//! `cancelled` order still counts; the ledger records that the purchase
//! happened, not that it was fulfilled.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        catalog::models::ProductUuid,
        orders::repository::OrdersRepository,
        reviews::{
            errors::ReviewsServiceError,
            models::{Rating, RatingSummary, SubmitRating},
            repository::ReviewsRepository,
        },
        users::models::UserUuid,
    },
};

const FEEDBACK_MIN_CHARS: usize = 2;
const FEEDBACK_MAX_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct MemReviewsService {
    db: Db,
    repository: ReviewsRepository,
    orders_repository: OrdersRepository,
}

impl MemReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: ReviewsRepository::new(),
            orders_repository: OrdersRepository::new(),
        }
    }
}

fn feedback_is_valid(feedback: &str) -> bool {
    let chars = feedback.chars().count();

    if !(FEEDBACK_MIN_CHARS..=FEEDBACK_MAX_CHARS).contains(&chars) {
        return false;
    }

    // "12345" is not a review.
    !feedback.chars().all(|c| c.is_ascii_digit())
}

#[async_trait]
impl ReviewsService for MemReviewsService {
    async fn submit_rating(
        &self,
        user: UserUuid,
        submission: SubmitRating,
    ) -> Result<Rating, ReviewsServiceError> {
        if !(1..=5).contains(&submission.value) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        if !feedback_is_valid(&submission.feedback) {
            return Err(ReviewsServiceError::InvalidFeedback);
        }

        let mut tx = self.db.begin().await;

        if self
            .repository
            .find_rating(&tx, user, submission.product_uuid)
            .is_some()
        {
            return Err(ReviewsServiceError::DuplicateRating);
        }

        if !self
            .orders_repository
            .user_has_purchased(&tx, user, submission.product_uuid)
        {
            return Err(ReviewsServiceError::PurchaseNotVerified);
        }

        let created = self.repository.insert_rating(&mut tx, user, submission);

        tx.commit();

        Ok(created)
    }

    async fn delete_rating(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await;

        let rows_affected = self.repository.delete_rating(&mut tx, user, product);

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit();

        Ok(())
    }

    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Rating>, ReviewsServiceError> {
        let store = self.db.read().await;

        Ok(self.repository.list_for_product(&store, product))
    }

    async fn list_all(&self) -> Result<Vec<Rating>, ReviewsServiceError> {
        let store = self.db.read().await;

        Ok(self.repository.list_all(&store))
    }

    async fn average_for(&self, product: ProductUuid) -> Result<RatingSummary, ReviewsServiceError> {
        let store = self.db.read().await;

        Ok(self.repository.summary_for_product(&store, product))
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Record a rating, if the user has purchased the product and has not
    /// rated it before.
    async fn submit_rating(
        &self,
        user: UserUuid,
        submission: SubmitRating,
    ) -> Result<Rating, ReviewsServiceError>;

    /// Delete the caller's own rating for a product.
    async fn delete_rating(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ReviewsServiceError>;

    /// All ratings for a product, newest first.
    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Rating>, ReviewsServiceError>;

    /// Admin: every rating across all products, newest first.
    async fn list_all(&self) -> Result<Vec<Rating>, ReviewsServiceError>;

    /// Mean rating and count; 0/0 when the product has no ratings.
    async fn average_for(&self, product: ProductUuid)
    -> Result<RatingSummary, ReviewsServiceError>;
}
