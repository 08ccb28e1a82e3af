//! JSON API handlers.

pub mod events;
