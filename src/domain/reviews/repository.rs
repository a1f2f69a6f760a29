//! Reviews Repository

use jiff::Timestamp;

use crate::{
    database::{Store, Tx},
    domain::{
        catalog::models::ProductUuid,
        reviews::models::{Rating, RatingSummary, RatingUuid, SubmitRating},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct ReviewsRepository;

impl ReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn find_rating(
        &self,
        store: &Store,
        user: UserUuid,
        product: ProductUuid,
    ) -> Option<Rating> {
        store
            .ratings
            .values()
            .find(|r| r.user_uuid == user && r.product_uuid == product)
            .cloned()
    }

    pub(crate) fn insert_rating(
        &self,
        tx: &mut Tx,
        user: UserUuid,
        submission: SubmitRating,
    ) -> Rating {
        let row = Rating {
            uuid: RatingUuid::now_v7(),
            user_uuid: user,
            product_uuid: submission.product_uuid,
            value: submission.value,
            feedback: submission.feedback,
            created_at: Timestamp::now(),
        };

        tx.ratings.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn delete_rating(
        &self,
        tx: &mut Tx,
        user: UserUuid,
        product: ProductUuid,
    ) -> u64 {
        let doomed = self.find_rating(tx, user, product).map(|r| r.uuid);

        match doomed {
            Some(uuid) => u64::from(tx.ratings.remove(&uuid).is_some()),
            None => 0,
        }
    }

    /// Every rating, across all products, newest first.
    pub(crate) fn list_all(&self, store: &Store) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = store.ratings.values().cloned().collect();
        ratings.sort_by(|a, b| (b.created_at, b.uuid).cmp(&(a.created_at, a.uuid)));

        ratings
    }

    /// All ratings for a product, newest first.
    pub(crate) fn list_for_product(&self, store: &Store, product: ProductUuid) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = store
            .ratings
            .values()
            .filter(|r| r.product_uuid == product)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| (b.created_at, b.uuid).cmp(&(a.created_at, a.uuid)));

        ratings
    }

    pub(crate) fn summary_for_product(
        &self,
        store: &Store,
        product: ProductUuid,
    ) -> RatingSummary {
        let values: Vec<u8> = store
            .ratings
            .values()
            .filter(|r| r.product_uuid == product)
            .map(|r| r.value)
            .collect();

        if values.is_empty() {
            return RatingSummary {
                average: 0.0,
                count: 0,
            };
        }

        let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();

        RatingSummary {
            // Ratings cap at 5 per row; the sum is far below f64's exact
            // integer range.
            average: sum as f64 / values.len() as f64,
            count: values.len() as u64,
        }
    }
}
