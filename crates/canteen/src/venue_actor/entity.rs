use crate::model::{Venue, VenueCreate, VenueFilter, VenueId, VenueUpdate};
use crate::venue_actor::VenueError;
use async_trait::async_trait;
use canteen_actor::ActorEntity;

/// A week has seven entries, Monday first.
pub const DAYS_PER_WEEK: usize = 7;

fn check_hours(hours: &[String]) -> Result<(), VenueError> {
    if hours.len() > DAYS_PER_WEEK {
        return Err(VenueError::ValidationError(format!(
            "weekly hours has {} entries, at most {DAYS_PER_WEEK} allowed",
            hours.len()
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Venue {
    type Id = VenueId;
    type Create = VenueCreate;
    type Update = VenueUpdate;
    type Filter = VenueFilter;
    type Context = ();
    type Error = VenueError;

    fn from_create_params(id: VenueId, params: VenueCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(VenueError::ValidationError("venue name is empty".into()));
        }
        check_hours(&params.weekly_hours)?;
        Ok(Self {
            id,
            name,
            open: params.open,
            weekly_hours: params.weekly_hours,
        })
    }

    fn matches(&self, filter: &VenueFilter) -> bool {
        filter
            .ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&self.id))
    }

    async fn on_update(&mut self, update: VenueUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(open) = update.open {
            self.open = open;
        }
        if let Some(hours) = update.weekly_hours {
            check_hours(&hours)?;
            self.weekly_hours = hours;
        }
        Ok(())
    }
}
