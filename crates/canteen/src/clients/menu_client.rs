//! # Menu Client
use crate::menu_actor::MenuError;
use crate::model::{MenuFilter, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, MenuSections, VenueId};
use async_trait::async_trait;
use canteen_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(venue = %params.venue_id, name = %params.name))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        self.inner.create(params).await.map_err(|e| {
            if e.is_conflict() {
                MenuError::ValidationError(format!("duplicate item: {e}"))
            } else {
                Self::map_error(e)
            }
        })
    }

    /// A venue's menu grouped for display, items in id order within each section.
    #[instrument(skip(self))]
    pub async fn menu_for(&self, venue_id: VenueId) -> Result<MenuSections, MenuError> {
        let mut items = self.list(MenuFilter { venue_id }).await?;
        items.sort_by_key(|item| item.id);
        Ok(MenuSections::from_items(items))
    }

    #[instrument(skip(self))]
    pub async fn set_available(&self, id: MenuItemId, available: bool) -> Result<MenuItem, MenuError> {
        let update = MenuItemUpdate {
            available: Some(available),
            ..Default::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        MenuError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_actor;

    fn item(name: &str, category: &str) -> MenuItemCreate {
        MenuItemCreate {
            venue_id: VenueId(1),
            name: name.into(),
            available: true,
            category: Some(category.into()),
            description: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_menu_moves_item_when_sold_out() {
        let (actor, inner) = menu_actor::new(8);
        tokio::spawn(actor.run(()));
        let client = MenuClient::new(inner);

        let latte = client.create_item(item("Latte", "cafe")).await.unwrap();
        client.create_item(item("Muffin", "snack")).await.unwrap();
        client.set_available(latte, false).await.unwrap();

        let menu = client.menu_for(VenueId(1)).await.unwrap();
        assert!(menu.coffees.is_empty());
        assert_eq!(menu.unavailable[0].name, "Latte");
        assert_eq!(menu.snacks.len(), 1);
        assert!(client.menu_for(VenueId(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_in_same_venue_rejected() {
        let (actor, inner) = menu_actor::new(8);
        tokio::spawn(actor.run(()));
        let client = MenuClient::new(inner);

        client.create_item(item("Latte", "cafe")).await.unwrap();
        let err = client.create_item(item("latte", "cafe")).await.unwrap_err();
        assert!(matches!(err, MenuError::ValidationError(_)));
    }
}
