//! Tariff-aware household appliance scheduler.

#[cfg(feature = "api")]
pub mod api;
pub mod appliance;
/// Typical appliance power ratings.
pub mod catalog;
pub mod config;
pub mod household;
pub mod io;
pub mod logging;
/// Hour ranking, allocation, and reporting.
pub mod sched;
pub mod tariff;
#[cfg(feature = "tui")]
pub mod tui;
