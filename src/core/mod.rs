//! Configuration, request models and config schemas shared by every block.

pub mod config;
pub mod models;
pub mod schema;
