//! [`ActorEntity`] implementations for [`Order`] headers and [`OrderLine`]s.

use crate::model::{
    Order, OrderCreate, OrderFilter, OrderId, OrderLine, OrderLineCreate, OrderLineFilter,
    OrderLineId, OrderStatus, OrderUpdate,
};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use canteen_actor::{ActorEntity, ResourceClient};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Filter = OrderFilter;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::new(id, params.user_id, params.venue_id, params.placed_at))
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.user_id.is_none_or(|user| user == self.user_id)
            && filter.venue_id.is_none_or(|venue| venue == self.venue_id)
    }

    /// Applies a kitchen status change and/or the rated flag.
    ///
    /// `Delivered` is terminal, and `rated` can only be set once the order is delivered.
    /// Skipped steps (`Received -> Delivered`) are accepted.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(status) = update.status {
            if self.status == OrderStatus::Delivered && status != OrderStatus::Delivered {
                return Err(OrderError::InvalidTransition {
                    id: self.id,
                    from: self.status,
                    to: status,
                });
            }
            self.status = status;
        }
        match update.rated {
            Some(true) if self.status != OrderStatus::Delivered => {
                return Err(OrderError::NotDelivered(self.id));
            }
            Some(false) if self.rated => {
                return Err(OrderError::ValidationError(format!(
                    "rating of {} cannot be withdrawn",
                    self.id
                )));
            }
            Some(rated) => self.rated = rated,
            None => {}
        }
        self.updated_at = update.at;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for OrderLine {
    type Id = OrderLineId;
    type Create = OrderLineCreate;
    type Update = ();
    type Filter = OrderLineFilter;
    /// Lines check their header exists before being stored.
    type Context = ResourceClient<Order>;
    type Error = OrderError;

    fn from_create_params(id: OrderLineId, params: OrderLineCreate) -> Result<Self, Self::Error> {
        let item_name = params.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(OrderError::ValidationError("line without item name".into()));
        }
        if params.quantity == 0 {
            return Err(OrderError::ValidationError(format!(
                "quantity of {item_name} must be positive"
            )));
        }
        Ok(Self {
            id,
            order_id: params.order_id,
            menu_item_id: params.menu_item_id,
            item_name,
            quantity: params.quantity,
        })
    }

    fn matches(&self, filter: &OrderLineFilter) -> bool {
        filter.order_ids.contains(&self.order_id)
    }

    /// An item appears at most once per order.
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.order_id, self.item_name))
    }

    async fn on_create(&mut self, orders: &ResourceClient<Order>) -> Result<(), Self::Error> {
        match orders.get(self.order_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::NotFound(self.order_id.to_string())),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &ResourceClient<Order>) -> Result<(), Self::Error> {
        Ok(())
    }
}
