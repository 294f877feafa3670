use crate::menu_actor::MenuError;
use crate::model::{MenuFilter, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use canteen_actor::ActorEntity;

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Filter = MenuFilter;
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err(MenuError::ValidationError("item name is empty".into()));
        }
        Ok(Self {
            id,
            venue_id: params.venue_id,
            name,
            available: params.available,
            category: params.category,
            description: params.description,
            image_url: params.image_url,
        })
    }

    fn matches(&self, filter: &MenuFilter) -> bool {
        self.venue_id == filter.venue_id
    }

    /// Names are unique within a venue's menu.
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.venue_id, self.name.to_lowercase()))
    }

    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(available) = update.available {
            self.available = available;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        Ok(())
    }
}
