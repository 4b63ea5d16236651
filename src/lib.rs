//! Void Armada - deterministic fleet combat simulator
//!
//! Ships exchange automated attacks over a fixed number of rounds. All
//! randomness is drawn from one seedable generator in deterministic call
//! order, so a fixed seed and fleet reproduce a battle exactly.

pub mod battle;
pub mod core;
pub mod dice;
pub mod fleet;
pub mod model;
