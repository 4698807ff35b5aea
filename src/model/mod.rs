//! Domain model for the set builder
//!
//! This module contains:
//! - The ordered Show aggregate and its mutation operations
//! - The SetItem sum type (one variant per row kind)
//! - Duration math and m:ss formatting

mod duration;
mod item;
mod show;

pub use duration::{MAX_MINUTES, clamp_minutes, format_duration, minutes_to_seconds};
pub use item::{ALL_KINDS, ItemKind, SetItem};
pub use show::{Show, Vibe};
