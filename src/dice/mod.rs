//! Dice expressions and the seedable random source

pub mod expr;
pub mod roller;

pub use expr::{DiceExpr, DiceRoll};
pub use roller::{Roller, SeededRoller};
