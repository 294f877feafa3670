//! # Venue Client
use crate::model::{Venue, VenueCreate, VenueFilter, VenueId, VenueUpdate};
use crate::venue_actor::VenueError;
use async_trait::async_trait;
use canteen_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct VenueClient {
    inner: ResourceClient<Venue>,
}

impl VenueClient {
    pub fn new(inner: ResourceClient<Venue>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_venue(&self, params: VenueCreate) -> Result<VenueId, VenueError> {
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The venues a user may order from, sorted by name.
    #[instrument(skip(self))]
    pub async fn venues_for(&self, ids: Vec<VenueId>) -> Result<Vec<Venue>, VenueError> {
        let mut venues = self.list(VenueFilter { ids: Some(ids) }).await?;
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(venues)
    }

    /// Current open flag and weekly hours of a venue.
    #[instrument(skip(self))]
    pub async fn config(&self, id: VenueId) -> Result<Venue, VenueError> {
        self.get(id)
            .await?
            .ok_or_else(|| VenueError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn set_open(&self, id: VenueId, open: bool) -> Result<Venue, VenueError> {
        let update = VenueUpdate {
            open: Some(open),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_hours(&self, id: VenueId, weekly_hours: Vec<String>) -> Result<Venue, VenueError> {
        let update = VenueUpdate {
            weekly_hours: Some(weekly_hours),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Venue> for VenueClient {
    type Error = VenueError;

    fn inner(&self) -> &ResourceClient<Venue> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        VenueError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue_actor;

    async fn started() -> VenueClient {
        let (actor, client) = venue_actor::new(8);
        tokio::spawn(actor.run(()));
        VenueClient::new(client)
    }

    fn venue(name: &str) -> VenueCreate {
        VenueCreate {
            name: name.into(),
            open: true,
            weekly_hours: vec!["08:00-16:00".into(); 5],
        }
    }

    #[tokio::test]
    async fn test_venues_for_filters_and_sorts_by_name() {
        let client = started().await;
        let north = client.create_venue(venue("North Tower")).await.unwrap();
        client.create_venue(venue("Lobby")).await.unwrap();
        let annex = client.create_venue(venue("Annex")).await.unwrap();

        let venues = client.venues_for(vec![north, annex]).await.unwrap();
        let names: Vec<_> = venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Annex", "North Tower"]);
    }

    #[tokio::test]
    async fn test_hours_with_more_than_seven_days_rejected() {
        let client = started().await;
        let id = client.create_venue(venue("Lobby")).await.unwrap();

        let err = client
            .set_hours(id, vec!["08:00-16:00".into(); 8])
            .await
            .unwrap_err();
        assert!(matches!(err, VenueError::ValidationError(_)));
        assert_eq!(client.config(id).await.unwrap().weekly_hours.len(), 5);
    }

    #[tokio::test]
    async fn test_config_of_unknown_venue() {
        let client = started().await;
        assert_eq!(
            client.config(VenueId(9)).await.unwrap_err(),
            VenueError::NotFound("venue_9".into())
        );
    }
}
