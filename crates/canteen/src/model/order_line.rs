//! The `order_lines` table: the items of an order, written after the header.

use crate::model::{LineItem, MenuItemId, OrderId, OrderLineId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn to_item(&self) -> LineItem {
        LineItem {
            name: self.item_name.clone(),
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderLineCreate {
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub item_name: String,
    pub quantity: u32,
}

/// Lines belonging to any of `order_ids`.
#[derive(Debug, Clone, Default)]
pub struct OrderLineFilter {
    pub order_ids: Vec<OrderId>,
}
