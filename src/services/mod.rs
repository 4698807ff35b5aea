//! External collaborators and app configuration
//!
//! This module contains:
//! - Application settings and window state persistence
//! - The catalog lookup and show persistence HTTP clients
//! - Wire (de)serialization of shows
//! - The background service bridge the UI talks to

mod bridge;
mod catalog;
mod settings;
mod store;
mod wire;

pub use bridge::{LookupTarget, ServiceBridge, ServiceEvent};
pub use catalog::{Artist, HttpCatalog, Roster, Song};
pub use settings::{AppSettings, WindowState};
pub use store::HttpShowStore;
pub use wire::{SaveResponse, StoredShow, WireItem, WireShow, show_from_stored};

/// User agent sent by both HTTP clients
pub const USER_AGENT: &str = concat!("Set-Builder/", env!("CARGO_PKG_VERSION"));
