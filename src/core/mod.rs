//! Core infrastructure: errors and configuration

pub mod config;
pub mod error;

pub use config::BattleConfig;
pub use error::{Result, SimError};
