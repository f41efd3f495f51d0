//! Robottelo configuration library.
//!
//! Reads `robottelo.properties`, validates every section, and hands test
//! code a configured [`Settings`] plus the entity defaults derived from it.

pub mod config;
pub mod entities;
pub mod observability;

pub use config::{ConfigError, Settings};
pub use entities::{EntityDefaults, EntityFactory, ServerConfig};
