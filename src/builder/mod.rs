//! Headless state for the Item Builder
//!
//! Pure draft and chooser logic, kept free of any UI types so it can be
//! unit tested directly.

mod chooser;
mod draft;

pub use chooser::{ChooserState, SongChooser, merge_catalogs};
pub use draft::ItemDraft;
