//! Persistent state
//!
//! The local key-value store and the two typed records layered on it:
//! the site settings singleton and the product catalog.

pub mod catalog;
pub mod local;
pub mod settings;
