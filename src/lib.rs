//! Playerconsole - admin surface for phone-line player records
//!
//! The service keeps a registry of player records (storage key -> opaque JSON
//! payload) and exposes it two ways:
//! - JSON API: list/get/put/delete records
//! - Admin page: server-rendered table with per-row view and delete actions
//!
//! The same route set is mounted at the root and under /debug so tooling that
//! expects either prefix keeps working.

pub mod config;
pub mod handlers;
pub mod models;
pub mod server;
pub mod store;
