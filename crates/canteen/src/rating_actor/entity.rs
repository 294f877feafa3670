use crate::model::{Rating, RatingCreate, RatingFilter, RatingId, MAX_STARS, MIN_STARS};
use crate::rating_actor::RatingError;
use async_trait::async_trait;
use canteen_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Rating {
    type Id = RatingId;
    type Create = RatingCreate;
    type Update = ();
    type Filter = RatingFilter;
    type Context = ();
    type Error = RatingError;

    fn from_create_params(id: RatingId, params: RatingCreate) -> Result<Self, Self::Error> {
        if !(MIN_STARS..=MAX_STARS).contains(&params.stars) {
            return Err(RatingError::InvalidStars {
                got: params.stars,
                min: MIN_STARS,
                max: MAX_STARS,
            });
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            order_id: params.order_id,
            venue_id: params.venue_id,
            stars: params.stars,
            comment: params.comment.trim().to_string(),
        })
    }

    fn matches(&self, filter: &RatingFilter) -> bool {
        filter.order_id.is_none_or(|order| order == self.order_id)
            && filter.user_id.is_none_or(|user| user == self.user_id)
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_id.to_string())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
