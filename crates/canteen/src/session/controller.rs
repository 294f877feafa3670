//! # Order Session
//!
//! State of one signed-in user ordering from one venue. Every time-dependent operation takes
//! `now` explicitly; [`SessionRunner`](crate::session::SessionRunner) supplies the clock.

use crate::alerts::{Alert, AlertSink, AudioSession, PushPayload};
use crate::clients::{OrderClient, RatingClient, VenueClient};
use crate::config::CanteenConfig;
use crate::model::{MenuItem, Order, OrderId, OrderStatus, PlaceOrder, RatingCreate, UserId, Venue, VenueId};
use crate::order_actor::OrderError;
use crate::rating_actor::RatingError;
use crate::session::block::{self, BlockState};
use crate::session::cart::{Cart, CartError};
use crate::session::error::{RateError, SubmitError};
use crate::session::hours;
use crate::session::ledger::NotificationLedger;
use crate::session::orders::OrderBook;
use crate::session::countdown;
use crate::venue_actor::VenueError;
use canteen_actor::ChangeEvent;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Where a ready transition was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Snapshot,
    Feed,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Snapshot => "snapshot",
            Source::Feed => "feed",
        }
    }
}

pub struct OrderSession {
    user_id: UserId,
    orders: OrderClient,
    venues: VenueClient,
    ratings: RatingClient,
    sink: Arc<dyn AlertSink>,
    config: CanteenConfig,

    venue: Option<Venue>,
    book: OrderBook,
    block: BlockState,
    cart: Cart,
    ledger: NotificationLedger,
    audio: AudioSession,
    notifications_permitted: bool,
}

impl OrderSession {
    pub fn new(
        user_id: UserId,
        orders: OrderClient,
        venues: VenueClient,
        ratings: RatingClient,
        sink: Arc<dyn AlertSink>,
        config: CanteenConfig,
    ) -> Self {
        Self {
            user_id,
            orders,
            venues,
            ratings,
            sink,
            config,
            venue: None,
            book: OrderBook::default(),
            block: BlockState::Unblocked,
            cart: Cart::default(),
            ledger: NotificationLedger::default(),
            audio: AudioSession::default(),
            notifications_permitted: false,
        }
    }

    // --- Venue scope ---

    /// Switches to `venue_id`: a new scope with an empty cart, book and ledger.
    ///
    /// Fails without touching the current scope when the venue cannot be loaded. A failed order
    /// load after a successful switch is logged and leaves the book empty until the next refresh.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn select_venue(&mut self, venue_id: VenueId, now: DateTime<Utc>) -> Result<(), VenueError> {
        let venue = self.venues.config(venue_id).await?;
        info!(venue = %venue.id, name = %venue.name, "Venue selected");
        self.venue = Some(venue);
        self.ledger.clear();
        self.cart.clear();
        self.book.clear();
        self.block = BlockState::Unblocked;
        if let Err(e) = self.refresh(now).await {
            debug!(venue = %venue_id, error = %e, "Switched with an empty book");
        }
        Ok(())
    }

    /// Reloads the open flag and hours of the current venue. Failures keep the last known values.
    pub async fn refresh_venue(&mut self) -> Result<(), VenueError> {
        let Some(current) = &self.venue else {
            return Ok(());
        };
        match self.venues.config(current.id).await {
            Ok(venue) => {
                self.venue = Some(venue);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Venue refresh failed, keeping last configuration");
                Err(e)
            }
        }
    }

    pub fn venue(&self) -> Option<&Venue> {
        self.venue.as_ref()
    }

    pub fn venue_id(&self) -> Option<VenueId> {
        self.venue.as_ref().map(|v| v.id)
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    // --- Orders ---

    /// A fresh receiver on the orders feed. Only changes after this call are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent<Order>> {
        self.orders.subscribe()
    }

    /// Reloads the user's orders in the current venue. Failures keep the current book.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> Result<(), OrderError> {
        let Some(venue_id) = self.venue_id() else {
            return Ok(());
        };
        match self.orders.list_for(self.user_id, venue_id).await {
            Ok(orders) => {
                self.apply_snapshot(orders, now);
                Ok(())
            }
            Err(e) => {
                warn!(venue = %venue_id, error = %e, "Order refresh failed, keeping current state");
                Err(e)
            }
        }
    }

    /// Replaces the book with `orders`, announcing ready orders not seen before.
    pub fn apply_snapshot(&mut self, orders: Vec<Order>, now: DateTime<Utc>) {
        let Some(venue_id) = self.venue_id() else {
            return;
        };
        let orders: Vec<Order> = orders
            .into_iter()
            .filter(|o| o.in_scope(self.user_id, venue_id))
            .collect();
        for order in orders.iter().filter(|o| o.status == OrderStatus::Ready) {
            self.announce(order.id, Source::Snapshot);
        }
        self.book.replace(orders);
        self.recompute(now);
    }

    /// Applies one feed event. Events of another user or venue are dropped.
    pub fn apply_event(&mut self, event: ChangeEvent<Order>, now: DateTime<Utc>) {
        let Some(venue_id) = self.venue_id() else {
            return;
        };
        if !event.record().in_scope(self.user_id, venue_id) {
            debug!(kind = event.kind(), "Dropping event outside the session scope");
            return;
        }
        let became_ready = match &event {
            ChangeEvent::Update { old, new } => {
                old.status != OrderStatus::Ready && new.status == OrderStatus::Ready
            }
            ChangeEvent::Insert(new) => new.status == OrderStatus::Ready,
            ChangeEvent::Delete(_) => false,
        };
        if became_ready {
            self.announce(event.record().id, Source::Feed);
        }
        self.book.apply(event);
        self.recompute(now);
    }

    fn announce(&mut self, order_id: OrderId, source: Source) {
        if !self.ledger.first_time(order_id) {
            debug!(%order_id, source = source.as_str(), "Ready already announced");
            return;
        }
        info!(%order_id, source = source.as_str(), "Order ready");
        let venue_name = self.venue.as_ref().map(|v| v.name.as_str()).unwrap_or_default();
        let payload = PushPayload::order_ready(venue_name);
        self.sink.deliver(Alert::Banner(payload.body.clone()));
        if self.audio.is_unlocked() {
            self.sink.deliver(Alert::Sound);
        }
        if self.notifications_permitted {
            self.sink.deliver(Alert::System(payload));
        }
    }

    fn recompute(&mut self, now: DateTime<Utc>) {
        let block = block::evaluate(&self.book, now, self.config.lock_window);
        if block != self.block {
            info!(from = %self.block, to = %block, "Block state changed");
            self.block = block;
        }
    }

    /// Countdown step: ends an expired time lock on the spot and returns the message to show.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<String> {
        self.expire(now);
        countdown::message(&self.block, now)
    }

    fn expire(&mut self, now: DateTime<Utc>) {
        if let BlockState::TimeLocked { until } = self.block {
            if now >= until {
                info!(%until, "Time lock expired");
                self.block = BlockState::Unblocked;
            }
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn block(&self) -> BlockState {
        self.block
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Option<String> {
        countdown::message(&self.block, now)
    }

    pub fn ledger(&self) -> &NotificationLedger {
        &self.ledger
    }

    /// Whether the current venue is taking orders at `now`, in the venues' local time.
    pub fn is_operating(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.config.utc_offset).naive_local();
        self.venue
            .as_ref()
            .is_some_and(|venue| hours::is_operating(venue, local))
    }

    // --- Cart & submission ---

    pub fn add_to_cart(&mut self, item: &MenuItem, now: DateTime<Utc>) -> Result<(), CartError> {
        let Some(venue_id) = self.venue_id() else {
            return Err(CartError::NoVenue);
        };
        if item.venue_id != venue_id {
            return Err(CartError::WrongVenue {
                item: item.name.clone(),
                venue: venue_id,
            });
        }
        self.expire(now);
        if self.block.is_blocked() {
            return Err(CartError::Blocked);
        }
        self.cart.add(item)
    }

    pub fn remove_from_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Places the cart as an order. On success the cart is emptied and the book reloaded;
    /// on failure the cart is kept for a retry.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn submit(&mut self, now: DateTime<Utc>) -> Result<OrderId, SubmitError> {
        self.expire(now);
        if self.block.is_blocked() {
            return Err(SubmitError::Blocked(self.block));
        }
        let Some(venue_id) = self.venue_id() else {
            return Err(SubmitError::NoVenue);
        };
        if !self.is_operating(now) {
            return Err(SubmitError::Closed);
        }
        if self.cart.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        let order = PlaceOrder {
            user_id: self.user_id,
            venue_id,
            placed_at: now,
            lines: self.cart.to_lines(),
        };
        match self.orders.place_order(order).await {
            Ok(order_id) => {
                self.cart.clear();
                if let Err(e) = self.refresh(now).await {
                    debug!(%order_id, error = %e, "Placed order shows up on the next poll");
                }
                Ok(order_id)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                if matches!(e, OrderError::Headless { .. }) {
                    // The header exists and counts toward the time lock.
                    if let Err(e) = self.refresh(now).await {
                        debug!(error = %e, "Headless order shows up on the next poll");
                    }
                }
                Err(SubmitError::Order(e))
            }
        }
    }

    // --- Rating ---

    /// Rates a delivered order and marks its header rated.
    ///
    /// A rating already on the server (another device) still marks the header rated, then
    /// reports `AlreadyRated`.
    #[instrument(skip(self, comment))]
    pub async fn rate(
        &mut self,
        order_id: OrderId,
        stars: u8,
        comment: String,
        now: DateTime<Utc>,
    ) -> Result<(), RateError> {
        let order = self
            .book
            .get(order_id)
            .ok_or(RateError::UnknownOrder(order_id))?;
        if order.status != OrderStatus::Delivered {
            return Err(RateError::NotDelivered(order_id));
        }
        if order.rated {
            return Err(RateError::AlreadyRated(order_id));
        }

        let rating = RatingCreate {
            user_id: self.user_id,
            order_id,
            venue_id: order.venue_id,
            stars,
            comment,
        };
        let already_rated = match self.ratings.rate(rating).await {
            Ok(_) => false,
            Err(RatingError::AlreadyRated(_)) => {
                info!(%order_id, "Order was already rated");
                true
            }
            Err(e) => return Err(RateError::Rating(e)),
        };

        // A rating exists either way; the header must say so or the next poll relocks.
        if let Err(e) = self.orders.mark_rated(order_id, now).await {
            // Rating again hits the uniqueness check and retries this.
            warn!(%order_id, error = %e, "Rating stored but order not marked rated");
        }
        self.book.mark_rated(order_id);
        self.recompute(now);
        if already_rated {
            return Err(RateError::AlreadyRated(order_id));
        }
        Ok(())
    }

    /// Rank of the user by delivered orders last month.
    pub async fn last_month_rank(&self, now: DateTime<Utc>) -> Result<Option<u32>, OrderError> {
        self.orders.last_month_rank(self.user_id, now).await
    }

    // --- Alerts ---

    /// Called on the first user gesture; sounds play from then on.
    pub fn unlock_audio(&mut self) {
        self.audio.unlock();
    }

    pub fn set_notifications_permitted(&mut self, permitted: bool) {
        self.notifications_permitted = permitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::RecordingAlertSink;
    use crate::model::{MenuItemId, OrderLine, Rating};
    use canteen_actor::mock::MockClient;
    use chrono::{TimeDelta, TimeZone};

    struct Fixture {
        orders: MockClient<Order>,
        lines: MockClient<OrderLine>,
        venues: MockClient<Venue>,
        ratings: MockClient<Rating>,
        sink: RecordingAlertSink,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                orders: MockClient::new(),
                lines: MockClient::new(),
                venues: MockClient::new(),
                ratings: MockClient::new(),
                sink: RecordingAlertSink::new(),
            }
        }

        fn session(&self) -> OrderSession {
            OrderSession::new(
                UserId(1),
                OrderClient::new(self.orders.client(), self.lines.client()),
                VenueClient::new(self.venues.client()),
                RatingClient::new(self.ratings.client()),
                Arc::new(self.sink.clone()),
                CanteenConfig::default(),
            )
        }
    }

    // Monday.
    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn lobby() -> Venue {
        Venue {
            id: VenueId(1),
            name: "Lobby".into(),
            open: true,
            weekly_hours: vec!["08:00-16:00".into(); 7],
        }
    }

    fn order(id: u32, status: OrderStatus, created: DateTime<Utc>) -> Order {
        let mut order = Order::new(OrderId(id), UserId(1), VenueId(1), created);
        order.status = status;
        order
    }

    fn latte() -> MenuItem {
        MenuItem {
            id: MenuItemId(5),
            venue_id: VenueId(1),
            name: "Latte".into(),
            available: true,
            category: Some("cafe".into()),
            description: None,
            image_url: None,
        }
    }

    async fn in_lobby(fx: &mut Fixture, orders: Vec<Order>) -> OrderSession {
        fx.venues.expect_get(VenueId(1)).return_ok(Some(lobby()));
        fx.orders.expect_list().return_ok(orders.clone());
        if !orders.is_empty() {
            fx.lines.expect_list().return_ok(Vec::new());
        }
        let mut session = fx.session();
        session.select_venue(VenueId(1), at(9, 0)).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_ready_seen_by_poll_and_feed_alerts_once() {
        let mut fx = Fixture::new();
        let placed = order(1, OrderStatus::Preparing, at(8, 30));
        let mut session = in_lobby(&mut fx, vec![placed.clone()]).await;

        let ready = Order {
            status: OrderStatus::Ready,
            ..placed.clone()
        };
        session.apply_snapshot(vec![ready.clone()], at(9, 1));
        session.apply_event(
            ChangeEvent::Update {
                old: placed,
                new: ready.clone(),
            },
            at(9, 1),
        );
        session.apply_snapshot(vec![ready], at(9, 2));

        assert_eq!(fx.sink.banners(), 1);
        assert!(session.ledger().contains(OrderId(1)));
    }

    #[tokio::test]
    async fn test_received_straight_to_ready_alerts_once() {
        let mut fx = Fixture::new();
        let placed = order(1, OrderStatus::Received, at(8, 30));
        let mut session = in_lobby(&mut fx, vec![placed.clone()]).await;

        let ready = Order {
            status: OrderStatus::Ready,
            ..placed.clone()
        };
        session.apply_event(
            ChangeEvent::Update {
                old: placed,
                new: ready.clone(),
            },
            at(9, 1),
        );
        session.apply_snapshot(vec![ready], at(9, 2));

        assert_eq!(fx.sink.banners(), 1);
        assert_eq!(session.book().active()[0].status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn test_sound_and_system_alert_are_gated() {
        let mut fx = Fixture::new();
        let mut session = in_lobby(&mut fx, Vec::new()).await;
        session.apply_event(ChangeEvent::Insert(order(1, OrderStatus::Ready, at(8, 0))), at(9, 0));
        assert_eq!(fx.sink.alerts().len(), 1);

        session.unlock_audio();
        session.set_notifications_permitted(true);
        session.apply_event(ChangeEvent::Insert(order(2, OrderStatus::Ready, at(8, 0))), at(9, 0));

        let alerts = fx.sink.alerts();
        assert_eq!(alerts.len(), 4);
        assert_eq!(alerts[2], Alert::Sound);
        assert!(matches!(alerts[3], Alert::System(_)));
    }

    #[tokio::test]
    async fn test_events_outside_scope_are_dropped() {
        let mut fx = Fixture::new();
        let mut session = in_lobby(&mut fx, Vec::new()).await;

        let mut elsewhere = order(1, OrderStatus::Ready, at(8, 0));
        elsewhere.venue_id = VenueId(2);
        let mut someone_else = order(2, OrderStatus::Ready, at(8, 0));
        someone_else.user_id = UserId(9);
        session.apply_event(ChangeEvent::Insert(elsewhere), at(9, 0));
        session.apply_event(ChangeEvent::Insert(someone_else), at(9, 0));

        assert!(session.book().is_empty());
        assert!(fx.sink.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_time_lock_expires_on_tick() {
        let mut fx = Fixture::new();
        let session_orders = vec![order(1, OrderStatus::Received, at(8, 15))];
        let mut session = in_lobby(&mut fx, session_orders).await;

        assert_eq!(
            session.block(),
            BlockState::TimeLocked { until: at(9, 15) }
        );
        assert_eq!(
            session.tick(at(9, 0)).as_deref(),
            Some("next order available in 15 min.")
        );
        assert_eq!(session.tick(at(9, 15)), None);
        assert_eq!(session.block(), BlockState::Unblocked);
    }

    #[tokio::test]
    async fn test_cart_rejected_while_blocked() {
        let mut fx = Fixture::new();
        let mut delivered = order(1, OrderStatus::Delivered, at(7, 0));
        delivered.updated_at = at(7, 30);
        let mut session = in_lobby(&mut fx, vec![delivered]).await;

        assert_eq!(session.add_to_cart(&latte(), at(9, 0)), Err(CartError::Blocked));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejections_keep_cart() {
        let mut fx = Fixture::new();
        let mut session = in_lobby(&mut fx, Vec::new()).await;

        assert_eq!(session.submit(at(9, 0)).await, Err(SubmitError::EmptyCart));
        session.add_to_cart(&latte(), at(9, 0)).unwrap();
        assert_eq!(session.submit(at(18, 0)).await, Err(SubmitError::Closed));
        assert!(!session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_rating_conflict_marks_order_rated() {
        let mut fx = Fixture::new();
        let delivered = order(1, OrderStatus::Delivered, at(7, 0));
        let mut session = in_lobby(&mut fx, vec![delivered.clone()]).await;
        fx.ratings
            .expect_create()
            .return_err(canteen_actor::FrameworkError::Conflict("order_1".into()));

        let rated = Order {
            rated: true,
            ..delivered.clone()
        };
        fx.orders.expect_update(OrderId(1)).return_ok(rated.clone());

        let result = session.rate(OrderId(1), 5, String::new(), at(9, 0)).await;

        assert_eq!(result, Err(RateError::AlreadyRated(OrderId(1))));
        assert!(session.book().get(OrderId(1)).unwrap().rated);
        assert_eq!(session.block(), BlockState::Unblocked);
        fx.orders.verify();

        // The next poll sees the header as rated and stays unblocked.
        fx.orders.expect_list().return_ok(vec![rated]);
        fx.lines.expect_list().return_ok(Vec::new());
        session.refresh(at(9, 5)).await.unwrap();
        assert_eq!(session.block(), BlockState::Unblocked);
    }

    #[tokio::test]
    async fn test_rate_rejects_undelivered_order() {
        let mut fx = Fixture::new();
        let mut session = in_lobby(&mut fx, vec![order(1, OrderStatus::Ready, at(7, 0))]).await;

        assert_eq!(
            session.rate(OrderId(1), 4, String::new(), at(9, 0)).await,
            Err(RateError::NotDelivered(OrderId(1)))
        );
        assert_eq!(
            session.rate(OrderId(8), 4, String::new(), at(9, 0)).await,
            Err(RateError::UnknownOrder(OrderId(8)))
        );
        fx.ratings.verify();
    }

    #[tokio::test]
    async fn test_operating_uses_configured_offset() {
        let fx = Fixture::new();
        let mut session = OrderSession::new(
            UserId(1),
            OrderClient::new(fx.orders.client(), fx.lines.client()),
            VenueClient::new(fx.venues.client()),
            RatingClient::new(fx.ratings.client()),
            Arc::new(fx.sink.clone()),
            CanteenConfig {
                utc_offset: chrono::FixedOffset::west_opt(3 * 3600).unwrap(),
                ..CanteenConfig::default()
            },
        );
        session.venue = Some(lobby());

        // 11:00 UTC is 08:00 local.
        assert!(session.is_operating(at(11, 0)));
        assert!(!session.is_operating(at(10, 59)));
        assert!(!session.is_operating(at(9, 0) + TimeDelta::hours(10)));
    }
}
