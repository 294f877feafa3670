//! # Canteen demo
//!
//! Starts the tables, opens a session for one user and walks an order from the cart to its rating,
//! with the kitchen's status changes arriving over the change feed.

use canteen::alerts::{PushPayload, TracingAlertSink};
use canteen::config::CanteenConfig;
use canteen::lifecycle::CanteenSystem;
use canteen::model::{MenuItemCreate, OrderStatus, UserId, VenueCreate};
use canteen::session::birthday::{BirthdayGreeter, MemoryStore};
use canteen::session::runner::system_clock;
use canteen_actor::tracing::setup_tracing;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CanteenConfig::load();
    let system = CanteenSystem::new(config);
    let user = UserId(1);

    // --- Backend data a venue manager would have entered ---
    let venue = system
        .venue_client
        .create_venue(VenueCreate {
            name: "Lobby Café".to_string(),
            open: true,
            weekly_hours: vec!["00:00-23:59".to_string(); 7],
        })
        .await
        .map_err(|e| e.to_string())?;
    let latte = system
        .menu_client
        .create_item(MenuItemCreate {
            venue_id: venue,
            name: "Latte".to_string(),
            available: true,
            category: Some("cafe".to_string()),
            description: Some("Double shot, whole milk".to_string()),
            image_url: None,
        })
        .await
        .map_err(|e| e.to_string())?;

    let menu = system
        .menu_client
        .menu_for(venue)
        .await
        .map_err(|e| e.to_string())?;
    info!(coffees = menu.coffees.len(), drinks = menu.drinks.len(), "Menu loaded");

    // --- The user's session ---
    let (session, task) = system.start_session(
        user,
        Arc::new(TracingAlertSink),
        BirthdayGreeter::new(MemoryStore::default(), Some("1990-01-01".to_string())),
        system_clock(),
    );
    session.select_venue(venue).await.map_err(|e| e.to_string())?;
    session.unlock_audio().await.map_err(|e| e.to_string())?;
    session.permit_notifications(true).await.map_err(|e| e.to_string())?;

    let item = menu
        .coffees
        .into_iter()
        .find(|i| i.id == latte)
        .ok_or("latte missing from menu")?;
    session.add_to_cart(item).await.map_err(|e| e.to_string())?;

    let order_id = async {
        info!("Submitting order");
        session.submit().await
    }
    .instrument(tracing::info_span!("order_submission"))
    .await
    .map_err(|e| e.to_string())?;

    // --- The kitchen works through the order ---
    for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Delivered] {
        tokio::time::sleep(Duration::from_millis(50)).await;
        system
            .order_client
            .set_status(order_id, status, Utc::now())
            .await
            .map_err(|e| e.to_string())?;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    let view = session.view().await.map_err(|e| e.to_string())?;
    info!(block = %view.block, countdown = ?view.countdown, "Before rating");

    match session.rate(order_id, 5, "Perfect foam").await {
        Ok(()) => info!(%order_id, "Order rated"),
        Err(e) => error!(error = %e, "Rating failed"),
    }
    let view = session.view().await.map_err(|e| e.to_string())?;
    info!(block = %view.block, countdown = ?view.countdown, "After rating");

    if let Err(e) = system
        .suggestion_client
        .submit(user, venue, "Oat milk, please")
        .await
    {
        error!(error = %e, "Suggestion failed");
    }

    let push = PushPayload::parse(r#"{"title":"Latte ready"}"#).map_err(|e| e.to_string())?;
    info!(title = %push.title, body = %push.body, "Sample push payload");

    drop(session);
    task.await.map_err(|e| e.to_string())?;
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
