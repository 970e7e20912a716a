//! spending-config
//!
//! User preferences the host pushes into the tracker: display currency,
//! remote mirror availability, and where data lives on disk.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, HOME_ENV};
