//! Client operations, grouped by domain.
//!
//! Every operation is an async method on [`AppState`](crate::state::AppState).
//! Mutations lock the records they touch, wait out the simulated latency,
//! then run a whole-record read-modify-write against the store.

pub mod backup;
pub mod calls;
pub mod contacts;
pub mod messaging;
pub mod onboarding;
pub mod profile;
pub mod settings;

use chrono::Local;

/// Wall-clock `HH:MM`, the display form used on messages.
pub(crate) fn clock_time() -> String {
    Local::now().format("%H:%M").to_string()
}
