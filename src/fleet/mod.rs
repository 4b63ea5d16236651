//! Fleet assembly: construction helpers and file loading

pub mod loader;
pub mod setup;

pub use loader::load_fleet;
pub use setup::{demo_fleet, new_ship, system_block};
