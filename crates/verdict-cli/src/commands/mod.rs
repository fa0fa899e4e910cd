//! Command implementations.

pub mod config;
pub mod normalize;

pub use self::config::execute_config;
pub use self::normalize::execute_normalize;
