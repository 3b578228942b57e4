//! chainview: a terminal explorer for a supply-chain ledger.
//!
//! Tabs are routed to lazily acquired panels. The router state (active tab
//! plus selection) lives on the UI thread; panel code is loaded on a Tokio
//! worker behind [`infrastructure::RuntimeBridge`].

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod logging;
pub mod panels;
pub mod router;
pub mod store;
pub mod ui;
