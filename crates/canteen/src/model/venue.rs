//! The `venues` table: one row per cafeteria, with its open flag and weekly hours.

use crate::model::VenueId;
use serde::{Deserialize, Serialize};

/// Venue configuration as published by the cafeteria staff.
///
/// `weekly_hours[0]` is Monday, `weekly_hours[6]` Sunday. Entries look like `"08:00-16:00"`;
/// anything else means the venue does not operate that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub open: bool,
    #[serde(default)]
    pub weekly_hours: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VenueCreate {
    pub name: String,
    pub open: bool,
    pub weekly_hours: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub open: Option<bool>,
    pub weekly_hours: Option<Vec<String>>,
}

/// `ids: None` selects every venue.
#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub ids: Option<Vec<VenueId>>,
}
