//! # Rating Client
use crate::model::{Rating, RatingCreate, RatingId};
use crate::rating_actor::RatingError;
use async_trait::async_trait;
use canteen_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct RatingClient {
    inner: ResourceClient<Rating>,
}

impl RatingClient {
    pub fn new(inner: ResourceClient<Rating>) -> Self {
        Self { inner }
    }

    /// Stores a rating. A second rating for the same order fails with
    /// [`RatingError::AlreadyRated`].
    #[instrument(skip(self, rating), fields(order = %rating.order_id, stars = rating.stars))]
    pub async fn rate(&self, rating: RatingCreate) -> Result<RatingId, RatingError> {
        let order_id = rating.order_id;
        let id = self
            .inner
            .create(rating)
            .await
            .map_err(|e| RatingError::for_order(order_id, e))?;
        info!(%id, %order_id, "Rating stored");
        Ok(id)
    }
}

#[async_trait]
impl ActorClient<Rating> for RatingClient {
    type Error = RatingError;

    fn inner(&self) -> &ResourceClient<Rating> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RatingError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, UserId, VenueId};
    use canteen_actor::mock::MockClient;

    #[tokio::test]
    async fn test_conflict_maps_to_already_rated() {
        let mut mock = MockClient::<Rating>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("order_4".into()));

        let client = RatingClient::new(mock.client());
        let err = client
            .rate(RatingCreate {
                user_id: UserId(1),
                order_id: OrderId(4),
                venue_id: VenueId(1),
                stars: 4,
                comment: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, RatingError::AlreadyRated(OrderId(4)));
        mock.verify();
    }
}
