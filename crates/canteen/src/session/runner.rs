//! # Session Runner
//!
//! Runs an [`OrderSession`] as its own task, in the same shape as a table actor: commands arrive
//! on an `mpsc` channel and are answered on `oneshot` channels. Between commands the runner
//! applies order feed events and fires three timers: a full reload, the countdown tick and the
//! birthday check. Everything touching the session happens on this one task, so the poll and the
//! feed never race on the order book.

use crate::config::CanteenConfig;
use crate::model::{MenuItem, Order, OrderId, VenueId};
use crate::order_actor::OrderError;
use crate::session::birthday::{BirthdayGreeter, LocalStore};
use crate::session::block::BlockState;
use crate::session::cart::{CartError, CartLine};
use crate::session::controller::OrderSession;
use crate::session::error::{RateError, SubmitError};
use crate::venue_actor::VenueError;
use canteen_actor::ChangeEvent;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Source of the current time. Tests pass a fixed or stepped clock.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Errors returned through a [`SessionHandle`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Session closed")]
    Closed,
    #[error(transparent)]
    Venue(#[from] VenueError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Rate(#[from] RateError),
}

/// What the ordering screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub venue_id: Option<VenueId>,
    pub operating: bool,
    pub active: Vec<Order>,
    pub history: Vec<Order>,
    pub block: BlockState,
    pub countdown: Option<String>,
    pub cart: Option<CartLine>,
    /// Age to congratulate the user on, set by the last birthday check of the day.
    pub greeting: Option<u32>,
}

enum Command {
    SelectVenue {
        venue_id: VenueId,
        respond_to: oneshot::Sender<Result<(), VenueError>>,
    },
    Refresh {
        respond_to: oneshot::Sender<Result<(), OrderError>>,
    },
    AddToCart {
        item: MenuItem,
        respond_to: oneshot::Sender<Result<(), CartError>>,
    },
    RemoveFromCart {
        respond_to: oneshot::Sender<()>,
    },
    Submit {
        respond_to: oneshot::Sender<Result<OrderId, SubmitError>>,
    },
    Rate {
        order_id: OrderId,
        stars: u8,
        comment: String,
        respond_to: oneshot::Sender<Result<(), RateError>>,
    },
    UnlockAudio {
        respond_to: oneshot::Sender<()>,
    },
    PermitNotifications {
        permitted: bool,
        respond_to: oneshot::Sender<()>,
    },
    Rank {
        respond_to: oneshot::Sender<Result<Option<u32>, OrderError>>,
    },
    View {
        respond_to: oneshot::Sender<SessionView>,
    },
}

/// Cloneable handle to a running session. The session stops when every handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<Command>,
}

impl SessionHandle {
    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> Command,
    ) -> Result<R, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    pub async fn select_venue(&self, venue_id: VenueId) -> Result<(), SessionError> {
        self.request(|respond_to| Command::SelectVenue { venue_id, respond_to })
            .await??;
        Ok(())
    }

    pub async fn refresh(&self) -> Result<(), SessionError> {
        self.request(|respond_to| Command::Refresh { respond_to })
            .await??;
        Ok(())
    }

    pub async fn add_to_cart(&self, item: MenuItem) -> Result<(), SessionError> {
        self.request(|respond_to| Command::AddToCart { item, respond_to })
            .await??;
        Ok(())
    }

    pub async fn remove_from_cart(&self) -> Result<(), SessionError> {
        self.request(|respond_to| Command::RemoveFromCart { respond_to })
            .await
    }

    pub async fn submit(&self) -> Result<OrderId, SessionError> {
        Ok(self
            .request(|respond_to| Command::Submit { respond_to })
            .await??)
    }

    pub async fn rate(&self, order_id: OrderId, stars: u8, comment: &str) -> Result<(), SessionError> {
        let comment = comment.to_string();
        self.request(|respond_to| Command::Rate {
            order_id,
            stars,
            comment,
            respond_to,
        })
        .await??;
        Ok(())
    }

    pub async fn unlock_audio(&self) -> Result<(), SessionError> {
        self.request(|respond_to| Command::UnlockAudio { respond_to })
            .await
    }

    pub async fn permit_notifications(&self, permitted: bool) -> Result<(), SessionError> {
        self.request(|respond_to| Command::PermitNotifications {
            permitted,
            respond_to,
        })
        .await
    }

    pub async fn last_month_rank(&self) -> Result<Option<u32>, SessionError> {
        Ok(self
            .request(|respond_to| Command::Rank { respond_to })
            .await??)
    }

    pub async fn view(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| Command::View { respond_to }).await
    }
}

pub struct SessionRunner<S: LocalStore> {
    session: OrderSession,
    greeter: BirthdayGreeter<S>,
    commands: mpsc::Receiver<Command>,
    feed: Option<broadcast::Receiver<ChangeEvent<Order>>>,
    config: CanteenConfig,
    clock: Clock,
    greeting: Option<u32>,
}

fn every(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn next_event(
    feed: &mut Option<broadcast::Receiver<ChangeEvent<Order>>>,
) -> Result<ChangeEvent<Order>, RecvError> {
    match feed {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

impl<S: LocalStore + 'static> SessionRunner<S> {
    pub fn new(
        session: OrderSession,
        greeter: BirthdayGreeter<S>,
        config: CanteenConfig,
        clock: Clock,
    ) -> (Self, SessionHandle) {
        let (sender, commands) = mpsc::channel(config.channel_buffer);
        let runner = Self {
            session,
            greeter,
            commands,
            feed: None,
            config,
            clock,
            greeting: None,
        };
        (runner, SessionHandle { sender })
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Runs until every [`SessionHandle`] is dropped.
    pub async fn run(mut self) {
        let user = self.session.user_id();
        info!(%user, "Session started");

        let mut poll = every(self.config.poll_interval);
        let mut countdown = every(self.config.tick_interval);
        // The greeting is checked right away, then periodically.
        let mut birthday = interval(self.config.birthday_interval);
        birthday.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    self.handle(command).await;
                }
                event = next_event(&mut self.feed) => self.on_feed(event).await,
                _ = poll.tick() => self.poll().await,
                _ = countdown.tick() => {
                    let now = self.now();
                    if let Some(message) = self.session.tick(now) {
                        debug!(%message, "Countdown");
                    }
                }
                _ = birthday.tick() => self.check_birthday(),
            }
        }

        info!(%user, "Session stopped");
    }

    async fn handle(&mut self, command: Command) {
        let now = self.now();
        match command {
            Command::SelectVenue {
                venue_id,
                respond_to,
            } => {
                // Subscribe before loading so no change between the load and the subscription
                // is missed. The old receiver and anything still queued on it are dropped.
                self.feed = Some(self.session.subscribe());
                let _ = respond_to.send(self.session.select_venue(venue_id, now).await);
            }
            Command::Refresh { respond_to } => {
                let _ = respond_to.send(self.session.refresh(now).await);
            }
            Command::AddToCart { item, respond_to } => {
                let _ = respond_to.send(self.session.add_to_cart(&item, now));
            }
            Command::RemoveFromCart { respond_to } => {
                self.session.remove_from_cart();
                let _ = respond_to.send(());
            }
            Command::Submit { respond_to } => {
                let _ = respond_to.send(self.session.submit(now).await);
            }
            Command::Rate {
                order_id,
                stars,
                comment,
                respond_to,
            } => {
                let _ = respond_to.send(self.session.rate(order_id, stars, comment, now).await);
            }
            Command::UnlockAudio { respond_to } => {
                self.session.unlock_audio();
                let _ = respond_to.send(());
            }
            Command::PermitNotifications {
                permitted,
                respond_to,
            } => {
                self.session.set_notifications_permitted(permitted);
                let _ = respond_to.send(());
            }
            Command::Rank { respond_to } => {
                let _ = respond_to.send(self.session.last_month_rank(now).await);
            }
            Command::View { respond_to } => {
                let _ = respond_to.send(self.view(now));
            }
        }
    }

    /// Failures keep the last known state until the next tick.
    async fn poll(&mut self) {
        let now = self.now();
        if let Err(e) = self.session.refresh_venue().await {
            debug!(error = %e, "Poll kept last venue configuration");
        }
        if let Err(e) = self.session.refresh(now).await {
            debug!(error = %e, "Poll kept current orders");
        }
    }

    async fn on_feed(&mut self, event: Result<ChangeEvent<Order>, RecvError>) {
        let now = self.now();
        match event {
            Ok(event) => self.session.apply_event(event, now),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Order feed lagged, reloading");
                if let Err(e) = self.session.refresh(now).await {
                    debug!(error = %e, "Reload after lag failed, next poll retries");
                }
            }
            Err(RecvError::Closed) => {
                warn!("Order feed closed, relying on polling");
                self.feed = None;
            }
        }
    }

    fn check_birthday(&mut self) {
        let today = self.now().with_timezone(&self.config.utc_offset).date_naive();
        match self.greeter.check(today) {
            Some(age) => self.greeting = Some(age),
            // Shown for the rest of that day only.
            None if !self.greeter.greeted_on(today) => self.greeting = None,
            None => {}
        }
    }

    fn view(&mut self, now: DateTime<Utc>) -> SessionView {
        let countdown = self.session.tick(now);
        let book = self.session.book();
        SessionView {
            venue_id: self.session.venue_id(),
            operating: self.session.is_operating(now),
            active: book.active().to_vec(),
            history: book.history().to_vec(),
            block: self.session.block(),
            countdown,
            cart: self.session.cart().line().cloned(),
            greeting: self.greeting,
        }
    }
}
