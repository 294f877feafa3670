//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Table lifecycle**: `Actor started` / `Shutdown` with the entity type and final row count.
//! - **Row operations**: `Created`, `Updated`, `Deleted` at `info`; payloads at `debug`.
//! - **Constraint violations and hook failures** at `warn`.
//! - **Session**: venue switches, feed events, ready alerts, refresh failures.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run -p canteen
//! RUST_LOG=debug cargo run -p canteen          # full payloads
//! RUST_LOG=canteen::session=debug cargo run -p canteen
//! ```
//!
//! With `RUST_LOG=info` an order that goes ready looks like:
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Created entity_type="OrderLine" id=line_1 size=1
//! INFO Updated entity_type="Order" id=order_1
//! INFO order_ready: Order ready order_id=order_1 source="feed"
//! ```

/// Initialise the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line comes from
        .compact()
        .init();
}
