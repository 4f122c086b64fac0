//! Shared browser instance manager.
//!
//! One Chrome connection per process, created on first use; every session it
//! hands out lives in its own browser context.

mod manager_core;
mod manager_pages;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_pages::CdpBrowserSession;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
