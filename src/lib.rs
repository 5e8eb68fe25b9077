#![warn(clippy::unwrap_used)]
//! Typed guild models and a small client for Discord's guild read/update routes.
pub(crate) mod utils;

/// Client configuration
pub mod config;
/// Constants
pub mod consts;
/// Error types
mod error;
/// Reading and updating a guild
pub mod guild;
/// Routes and transport
pub mod http;
/// Guild data model
pub mod model;

pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result, SchemaError};
pub use guild::GuildClient;
