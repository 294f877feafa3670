use crate::alerts::AlertSink;
use crate::clients::{MenuClient, OrderClient, RatingClient, SuggestionClient, VenueClient};
use crate::config::CanteenConfig;
use crate::model::UserId;
use crate::session::birthday::{BirthdayGreeter, LocalStore};
use crate::session::runner::Clock;
use crate::session::{OrderSession, SessionHandle, SessionRunner};
use crate::{menu_actor, order_actor, rating_actor, suggestion_actor, venue_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// All tables of the canteen backend, running.
///
/// # Example
///
/// ```ignore
/// let system = CanteenSystem::new(CanteenConfig::load());
/// let venue = system.venue_client.create_venue(params).await?;
/// let (session, task) = system.start_session(user, sink, greeter, system_clock());
/// session.select_venue(venue).await?;
/// drop(session);
/// task.await?;
/// system.shutdown().await?;
/// ```
pub struct CanteenSystem {
    pub order_client: OrderClient,
    pub venue_client: VenueClient,
    pub menu_client: MenuClient,
    pub rating_client: RatingClient,
    pub suggestion_client: SuggestionClient,
    config: CanteenConfig,
    handles: Vec<JoinHandle<()>>,
}

impl CanteenSystem {
    /// Spawns every table actor. Must be called inside a Tokio runtime.
    pub fn new(config: CanteenConfig) -> Self {
        let buffer = config.channel_buffer;

        let (venue_actor, venue_table) = venue_actor::new(buffer);
        let venue_handle = tokio::spawn(venue_actor.run(()));

        let (menu_actor, menu_table) = menu_actor::new(buffer);
        let menu_handle = tokio::spawn(menu_actor.run(()));

        // Lines get the orders client to check their header on insert.
        let (order_actor, order_table) = order_actor::new(buffer);
        let (line_actor, line_table) = order_actor::new_lines(buffer);
        let order_handle = tokio::spawn(order_actor.run(()));
        let line_handle = tokio::spawn(line_actor.run(order_table.clone()));

        let (rating_actor, rating_table) = rating_actor::new(buffer);
        let rating_handle = tokio::spawn(rating_actor.run(()));

        let (suggestion_actor, suggestion_table) = suggestion_actor::new(buffer);
        let suggestion_handle = tokio::spawn(suggestion_actor.run(()));

        info!(buffer, "Canteen tables started");

        Self {
            order_client: OrderClient::new(order_table, line_table),
            venue_client: VenueClient::new(venue_table),
            menu_client: MenuClient::new(menu_table),
            rating_client: RatingClient::new(rating_table),
            suggestion_client: SuggestionClient::new(suggestion_table),
            config,
            handles: vec![
                venue_handle,
                menu_handle,
                order_handle,
                line_handle,
                rating_handle,
                suggestion_handle,
            ],
        }
    }

    pub fn config(&self) -> &CanteenConfig {
        &self.config
    }

    /// Spawns an ordering session for `user_id`. The task ends once every handle is dropped.
    pub fn start_session<S: LocalStore + 'static>(
        &self,
        user_id: UserId,
        sink: Arc<dyn AlertSink>,
        greeter: BirthdayGreeter<S>,
        clock: Clock,
    ) -> (SessionHandle, JoinHandle<()>) {
        let session = OrderSession::new(
            user_id,
            self.order_client.clone(),
            self.venue_client.clone(),
            self.rating_client.clone(),
            sink,
            self.config.clone(),
        );
        let (runner, handle) = SessionRunner::new(session, greeter, self.config.clone(), clock);
        (handle, tokio::spawn(runner.run()))
    }

    /// Drops the clients and waits for every table to stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down canteen tables...");

        drop(self.order_client);
        drop(self.venue_client);
        drop(self.menu_client);
        drop(self.rating_client);
        drop(self.suggestion_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("Canteen shutdown complete.");
        Ok(())
    }
}
