//! Storefront Admin
//!
//! Desktop admin panel for the Century Scents storefront: product
//! catalog CRUD and site-wide display settings, persisted as JSON blobs
//! in a local key-value store. Every save broadcasts a change event,
//! which feeds the built-in storefront preview the same way the real
//! storefront page follows storage changes.

pub mod app;
pub mod export;
pub mod store;
pub mod ui;
