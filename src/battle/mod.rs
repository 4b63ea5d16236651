//! Battle system - round-based fleet combat
//!
//! Each round: orders -> hazards -> shooting -> missiles -> boarding -> repair.
//! All randomness flows through one seeded [`crate::dice::Roller`], so a
//! fixed seed and fleet reproduce a battle exactly.

pub mod boarding;
pub mod execution;
pub mod hazards;
pub mod missiles;
pub mod orders;
pub mod repair;
pub mod resolution;

// Re-exports for convenient access
pub use boarding::boarding_phase;
pub use execution::{
    BattleEvent, BattleEventLog, BattleEventType, BattlePhase, BattleState, ShipReport,
};
pub use hazards::{apply_hazard, resolve_hazards, Hazard};
pub use missiles::missile_phase;
pub use orders::{select_orders, BattleOrder};
pub use repair::repair_phase;
pub use resolution::{shooting_phase, target_candidates};
