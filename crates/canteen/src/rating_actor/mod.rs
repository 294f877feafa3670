//! # Rating Table
//!
//! One rating per order, enforced by the table's uniqueness constraint on `order_id`. A second
//! insert for the same order surfaces as [`RatingError::AlreadyRated`].

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Rating;
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates the `ratings` table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Rating>, ResourceClient<Rating>) {
    ResourceActor::new(buffer_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, RatingCreate, UserId, VenueId};

    fn rating(order: u32, stars: u8) -> RatingCreate {
        RatingCreate {
            user_id: UserId(1),
            order_id: OrderId(order),
            venue_id: VenueId(1),
            stars,
            comment: "  good  ".into(),
        }
    }

    #[tokio::test]
    async fn test_second_rating_for_order_conflicts() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        client.create(rating(3, 5)).await.unwrap();
        let err = client.create(rating(3, 4)).await.unwrap_err();

        assert_eq!(
            RatingError::for_order(OrderId(3), err),
            RatingError::AlreadyRated(OrderId(3))
        );
    }

    #[tokio::test]
    async fn test_stars_out_of_range_rejected() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        for stars in [0, 6] {
            let err = client.create(rating(1, stars)).await.unwrap_err();
            assert!(matches!(
                RatingError::from(err),
                RatingError::InvalidStars { .. }
            ));
        }
        let id = client.create(rating(1, 1)).await.unwrap();
        assert_eq!(client.get(id).await.unwrap().unwrap().comment, "good");
    }
}
