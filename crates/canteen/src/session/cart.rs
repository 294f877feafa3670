//! The order draft: one item, quantity one.

use crate::model::{MenuItem, MenuItemId, PlaceOrderLine, VenueId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("The cart already holds {0}; remove it first")]
    Occupied(String),
    #[error("{0} is not available right now")]
    Unavailable(String),
    #[error("Ordering is blocked")]
    Blocked,
    #[error("No venue selected")]
    NoVenue,
    #[error("{item} is not on the menu of {venue}")]
    WrongVenue { item: String, venue: VenueId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    line: Option<CartLine>,
}

impl Cart {
    /// Puts `item` in an empty cart. An occupied cart is left as it was.
    pub fn add(&mut self, item: &MenuItem) -> Result<(), CartError> {
        if let Some(line) = &self.line {
            return Err(CartError::Occupied(line.name.clone()));
        }
        if !item.available {
            return Err(CartError::Unavailable(item.name.clone()));
        }
        self.line = Some(CartLine {
            menu_item_id: item.id,
            name: item.name.clone(),
        });
        Ok(())
    }

    /// Removing never decrements: the cart is emptied.
    pub fn clear(&mut self) {
        self.line = None;
    }

    pub fn line(&self) -> Option<&CartLine> {
        self.line.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_none()
    }

    pub fn to_lines(&self) -> Vec<PlaceOrderLine> {
        self.line
            .iter()
            .map(|line| PlaceOrderLine {
                menu_item_id: line.menu_item_id,
                item_name: line.name.clone(),
                quantity: 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, name: &str, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            venue_id: VenueId(1),
            name: name.into(),
            available,
            category: None,
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn test_second_item_rejected_without_mutation() {
        let mut cart = Cart::default();
        cart.add(&item(1, "Latte", true)).unwrap();

        let err = cart.add(&item(2, "Muffin", true)).unwrap_err();
        assert_eq!(err, CartError::Occupied("Latte".into()));
        assert_eq!(cart.line().unwrap().menu_item_id, MenuItemId(1));

        // The same item twice is still one line of quantity one.
        assert!(cart.add(&item(1, "Latte", true)).is_err());
        assert_eq!(cart.to_lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_clears_and_unavailable_rejected() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add(&item(1, "Latte", false)),
            Err(CartError::Unavailable("Latte".into()))
        );
        cart.add(&item(2, "Muffin", true)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.to_lines().is_empty());
    }
}
