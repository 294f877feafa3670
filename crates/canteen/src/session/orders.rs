//! The user's orders in the active venue, split into active and history.

use crate::model::{Order, OrderId};
use canteen_actor::ChangeEvent;
use std::cmp::Ordering;

/// Orders of one (user, venue) scope.
///
/// Both lists are kept sorted most recently updated first, ties broken by creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    active: Vec<Order>,
    history: Vec<Order>,
}

fn recent_first(a: &Order, b: &Order) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then(b.created_at.cmp(&a.created_at))
}

impl OrderBook {
    pub fn new(orders: Vec<Order>) -> Self {
        let mut book = Self::default();
        book.replace(orders);
        book
    }

    /// Replaces the whole book with a fresh snapshot.
    pub fn replace(&mut self, orders: Vec<Order>) {
        let (active, history): (Vec<Order>, Vec<Order>) =
            orders.into_iter().partition(|o| o.status.is_active());
        self.active = active;
        self.history = history;
        self.sort();
    }

    /// Applies one row change from the feed.
    ///
    /// Feed rows carry no items, so an updated row keeps the items already known for it.
    pub fn apply(&mut self, event: ChangeEvent<Order>) {
        match event {
            ChangeEvent::Insert(order) | ChangeEvent::Update { new: order, .. } => {
                let mut order = order;
                if let Some(known) = self.take(order.id) {
                    if order.items.is_empty() {
                        order.items = known.items;
                    }
                }
                if order.status.is_active() {
                    self.active.push(order);
                } else {
                    self.history.push(order);
                }
                self.sort();
            }
            ChangeEvent::Delete(order) => {
                self.take(order.id);
            }
        }
    }

    fn take(&mut self, id: OrderId) -> Option<Order> {
        for list in [&mut self.active, &mut self.history] {
            if let Some(pos) = list.iter().position(|o| o.id == id) {
                return Some(list.remove(pos));
            }
        }
        None
    }

    fn sort(&mut self) {
        self.active.sort_by(recent_first);
        self.history.sort_by(recent_first);
    }

    /// Not yet delivered.
    pub fn active(&self) -> &[Order] {
        &self.active
    }

    /// Delivered.
    pub fn history(&self) -> &[Order] {
        &self.history
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.active
            .iter()
            .chain(self.history.iter())
            .find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.active.iter().chain(self.history.iter())
    }

    /// Sets the local rated flag. Returns `false` when the order is unknown.
    pub fn mark_rated(&mut self, id: OrderId) -> bool {
        match self.history.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.rated = true;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, OrderStatus, UserId, VenueId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, min, 0).unwrap()
    }

    fn order(id: u32, status: OrderStatus, created: u32, updated: u32) -> Order {
        let mut order = Order::new(OrderId(id), UserId(1), VenueId(1), at(created));
        order.status = status;
        order.updated_at = at(updated);
        order
    }

    #[test]
    fn test_classify_and_sort() {
        let book = OrderBook::new(vec![
            order(1, OrderStatus::Delivered, 0, 10),
            order(2, OrderStatus::Received, 20, 20),
            order(3, OrderStatus::Ready, 5, 30),
            order(4, OrderStatus::Delivered, 1, 40),
        ]);

        let active: Vec<_> = book.active().iter().map(|o| o.id.0).collect();
        let history: Vec<_> = book.history().iter().map(|o| o.id.0).collect();
        assert_eq!(active, vec![3, 2]);
        assert_eq!(history, vec![4, 1]);
    }

    #[test]
    fn test_update_moves_order_to_history_and_keeps_items() {
        let mut placed = order(1, OrderStatus::Ready, 0, 5);
        placed.items = vec![LineItem {
            name: "Latte".into(),
            quantity: 1,
        }];
        let mut book = OrderBook::new(vec![placed.clone()]);

        let mut delivered = order(1, OrderStatus::Delivered, 0, 9);
        delivered.items.clear();
        book.apply(ChangeEvent::Update {
            old: placed,
            new: delivered,
        });

        assert!(book.active().is_empty());
        assert_eq!(book.history()[0].items.len(), 1);
        assert_eq!(book.history()[0].updated_at, at(9));
    }

    #[test]
    fn test_delete_and_mark_rated() {
        let mut book = OrderBook::new(vec![
            order(1, OrderStatus::Delivered, 0, 1),
            order(2, OrderStatus::Preparing, 2, 2),
        ]);
        assert!(book.mark_rated(OrderId(1)));
        assert!(book.get(OrderId(1)).unwrap().rated);
        assert!(!book.mark_rated(OrderId(2)));

        book.apply(ChangeEvent::Delete(order(2, OrderStatus::Preparing, 2, 2)));
        assert!(book.get(OrderId(2)).is_none());
        assert_eq!(book.iter().count(), 1);
    }
}
