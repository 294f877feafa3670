//! The `menu_items` table and the grouping used to present a venue's menu.

use crate::model::{MenuItemId, VenueId};
use serde::{Deserialize, Serialize};

/// A dish or drink offered by a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub venue_id: VenueId,
    pub name: String,
    pub available: bool,
    /// Free-form kind set by staff: `"cafe"`, `"snack"`, anything else is a drink.
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl MenuItem {
    pub fn section(&self) -> MenuSection {
        if !self.available {
            return MenuSection::Unavailable;
        }
        match self.category.as_deref() {
            Some("cafe") => MenuSection::Coffee,
            Some("snack") => MenuSection::Snack,
            _ => MenuSection::Drink,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub venue_id: VenueId,
    pub name: String,
    pub available: bool,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuItemUpdate {
    pub available: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MenuFilter {
    pub venue_id: VenueId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSection {
    Coffee,
    Drink,
    Snack,
    Unavailable,
}

/// A venue's menu split into display sections, each keeping the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSections {
    pub coffees: Vec<MenuItem>,
    pub drinks: Vec<MenuItem>,
    pub snacks: Vec<MenuItem>,
    pub unavailable: Vec<MenuItem>,
}

impl MenuSections {
    pub fn from_items(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut sections = Self::default();
        for item in items {
            let bucket = match item.section() {
                MenuSection::Coffee => &mut sections.coffees,
                MenuSection::Drink => &mut sections.drinks,
                MenuSection::Snack => &mut sections.snacks,
                MenuSection::Unavailable => &mut sections.unavailable,
            };
            bucket.push(item);
        }
        sections
    }

    pub fn is_empty(&self) -> bool {
        self.coffees.is_empty()
            && self.drinks.is_empty()
            && self.snacks.is_empty()
            && self.unavailable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, category: Option<&str>, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            venue_id: VenueId(1),
            name: format!("item {id}"),
            available,
            category: category.map(str::to_string),
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn test_sections_split_by_category_and_availability() {
        let sections = MenuSections::from_items(vec![
            item(1, Some("cafe"), true),
            item(2, Some("snack"), true),
            item(3, Some("jugo"), true),
            item(4, None, true),
            item(5, Some("cafe"), false),
        ]);

        assert_eq!(sections.coffees.len(), 1);
        assert_eq!(sections.snacks.len(), 1);
        assert_eq!(
            sections.drinks.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![MenuItemId(3), MenuItemId(4)]
        );
        assert_eq!(sections.unavailable[0].id, MenuItemId(5));
    }

    #[test]
    fn test_empty_menu() {
        assert!(MenuSections::from_items(Vec::new()).is_empty());
    }
}
