//! Endpoint bindings, grouped by API tag.

pub mod connections;
