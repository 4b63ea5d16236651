//! Entity model: ships, subsystems and weapons

pub mod ship;
pub mod system;
pub mod weapons;

pub use ship::{FieldValue, Ship};
pub use system::{ShipSystem, SystemStatus};
pub use weapons::{FiringArc, RangeBand, SpecialTrait, WeaponBattery, WeaponSystem};
