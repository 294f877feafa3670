//! # Order Client
//!
//! High-level API over the `orders` and `order_lines` tables.
use crate::model::{
    Order, OrderCreate, OrderFilter, OrderId, OrderLine, OrderLineCreate, OrderLineFilter,
    OrderStatus, OrderUpdate, PlaceOrder, UserId, VenueId,
};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use canteen_actor::{ActorClient, ChangeEvent, FrameworkError, ResourceClient};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

/// Client for the order tables.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    lines: ResourceClient<OrderLine>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, lines: ResourceClient<OrderLine>) -> Self {
        Self { inner, lines }
    }

    /// Writes the order header, then one row per line.
    ///
    /// The two writes are not atomic. If a line fails after the header succeeded, the header is
    /// left in place and [`OrderError::Headless`] names it.
    #[instrument(skip(self, order), fields(user = %order.user_id, venue = %order.venue_id))]
    pub async fn place_order(&self, order: PlaceOrder) -> Result<OrderId, OrderError> {
        if order.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no lines".into()));
        }
        let order_id = self
            .inner
            .create(OrderCreate {
                user_id: order.user_id,
                venue_id: order.venue_id,
                placed_at: order.placed_at,
            })
            .await
            .map_err(Self::map_error)?;

        for line in order.lines {
            let create = OrderLineCreate {
                order_id,
                menu_item_id: line.menu_item_id,
                item_name: line.item_name,
                quantity: line.quantity,
            };
            if let Err(e) = self.lines.create(create).await {
                let reason = Self::map_error(e).to_string();
                warn!(%order_id, %reason, "Order header written without its lines");
                return Err(OrderError::Headless { order_id, reason });
            }
        }
        info!(%order_id, "Order placed");
        Ok(order_id)
    }

    /// The user's orders at `venue_id` with their items joined, most recently updated first.
    #[instrument(skip(self))]
    pub async fn list_for(&self, user_id: UserId, venue_id: VenueId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list(OrderFilter::scope(user_id, venue_id)).await?;
        if orders.is_empty() {
            return Ok(orders);
        }
        let filter = OrderLineFilter {
            order_ids: orders.iter().map(|o| o.id).collect(),
        };
        let mut lines = self.lines.list(filter).await.map_err(Self::map_error)?;
        lines.sort_by_key(|line| line.id);

        let mut by_order: HashMap<OrderId, Vec<_>> = HashMap::new();
        for line in &lines {
            by_order.entry(line.order_id).or_default().push(line.to_item());
        }
        for order in &mut orders {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }
        orders.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(orders)
    }

    /// Kitchen-side status change.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        self.inner
            .update(id, OrderUpdate::status(status, at))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn mark_rated(&self, id: OrderId, at: DateTime<Utc>) -> Result<Order, OrderError> {
        self.inner
            .update(id, OrderUpdate::rated(at))
            .await
            .map_err(Self::map_error)
    }

    /// Change feed of the `orders` table. Rows on the feed carry no items.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent<Order>> {
        self.inner.subscribe()
    }

    /// The user's position among all users by delivered orders placed in the calendar month
    /// before `now`. `None` when the user had no delivered order that month.
    ///
    /// Users with the same count share a position (1, 1, 3).
    #[instrument(skip(self))]
    pub async fn last_month_rank(&self, user_id: UserId, now: DateTime<Utc>) -> Result<Option<u32>, OrderError> {
        let Some((from, to)) = previous_month(now.date_naive()) else {
            return Ok(None);
        };
        let orders = self.list(OrderFilter::default()).await?;

        let mut counts: HashMap<UserId, u32> = HashMap::new();
        for order in orders.iter().filter(|o| o.status == OrderStatus::Delivered) {
            let day = order.created_at.date_naive();
            if day >= from && day < to {
                *counts.entry(order.user_id).or_default() += 1;
            }
        }
        let Some(&mine) = counts.get(&user_id) else {
            return Ok(None);
        };
        let ahead = counts.values().filter(|&&count| count > mine).count() as u32;
        Ok(Some(ahead + 1))
    }
}

/// `[first day of last month, first day of this month)`.
fn previous_month(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let this_month = today.with_day(1)?;
    let (year, month) = match today.month() {
        1 => (today.year() - 1, 12),
        m => (today.year(), m - 1),
    };
    Some((NaiveDate::from_ymd_opt(year, month, 1)?, this_month))
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItemId, OrderLineId, PlaceOrderLine};
    use canteen_actor::mock::MockClient;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn place() -> PlaceOrder {
        PlaceOrder {
            user_id: UserId(1),
            venue_id: VenueId(2),
            placed_at: at(9, 0),
            lines: vec![PlaceOrderLine {
                menu_item_id: MenuItemId(5),
                item_name: "Latte".into(),
                quantity: 1,
            }],
        }
    }

    #[test]
    fn test_previous_month_wraps_year() {
        let (from, to) = previous_month(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_line_failure_reports_headless_order() {
        let mut orders = MockClient::<Order>::new();
        let mut lines = MockClient::<OrderLine>::new();
        orders.expect_create().return_ok(OrderId(7));
        lines
            .expect_create()
            .return_err(FrameworkError::ActorClosed);

        let client = OrderClient::new(orders.client(), lines.client());
        let err = client.place_order(place()).await.unwrap_err();

        assert!(matches!(err, OrderError::Headless { order_id: OrderId(7), .. }));
        orders.verify();
        lines.verify();
    }

    #[tokio::test]
    async fn test_header_failure_writes_no_lines() {
        let mut orders = MockClient::<Order>::new();
        let lines = MockClient::<OrderLine>::new();
        orders
            .expect_create()
            .return_err(FrameworkError::ActorClosed);

        let client = OrderClient::new(orders.client(), lines.client());
        let err = client.place_order(place()).await.unwrap_err();

        assert!(matches!(err, OrderError::ActorCommunicationError(_)));
        lines.verify();
    }

    #[tokio::test]
    async fn test_list_for_joins_items_and_sorts_by_update() {
        let mut orders = MockClient::<Order>::new();
        let mut lines = MockClient::<OrderLine>::new();

        let older = Order::new(OrderId(1), UserId(1), VenueId(2), at(8, 0));
        let mut newer = Order::new(OrderId(2), UserId(1), VenueId(2), at(7, 0));
        newer.updated_at = at(9, 0);
        orders.expect_list().return_ok(vec![older, newer]);
        lines.expect_list().return_ok(vec![OrderLine {
            id: OrderLineId(1),
            order_id: OrderId(1),
            menu_item_id: MenuItemId(5),
            item_name: "Latte".into(),
            quantity: 1,
        }]);

        let client = OrderClient::new(orders.client(), lines.client());
        let listed = client.list_for(UserId(1), VenueId(2)).await.unwrap();

        assert_eq!(listed[0].id, OrderId(2));
        assert!(listed[0].items.is_empty());
        assert_eq!(listed[1].items[0].name, "Latte");
    }
}
