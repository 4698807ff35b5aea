//! UI components

mod item_builder;
mod set_list;
mod status_bar;

pub use item_builder::{BuilderUpdate, ItemBuilderWindow};
pub use set_list::SetList;
