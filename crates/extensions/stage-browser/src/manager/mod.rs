//! Browser process manager.
//!
//! Launches Chrome with a persistent profile and remote debugging enabled,
//! or reuses one already listening on the debug port.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
