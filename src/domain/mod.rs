//! Domain types for the item service.

pub mod item;

pub use item::{Item, ItemPayload};
