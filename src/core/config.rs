//! Battle configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::dice::DiceExpr;

/// Configuration for a battle run
///
/// These values have been tuned so that a pair of demo cruisers usually
/// trade meaningful damage inside three rounds. Changing them affects
/// pacing, not correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleConfig {
    // === ROUND DRIVER ===
    /// Number of rounds to run
    ///
    /// The driver runs exactly this many rounds regardless of how many
    /// ships remain alive. There is no early-exit for a wipeout.
    pub rounds: u32,

    // === SHOOTING PHASE ===
    /// Attack roll for the shooting phase
    ///
    /// The attacker's order modifier and the firing battery's accuracy
    /// are added on top of this roll.
    pub attack_dice: String,

    /// An attack hits only if the attack total strictly exceeds this
    /// value plus the target's defense modifier
    pub hit_threshold: i32,

    /// Percentile save rolled by the target on a hit
    ///
    /// The hit penetrates only if the roll strictly exceeds the target's
    /// current shield value.
    pub shield_save_dice: String,

    /// Damage roll used when the attacker has no weapon batteries
    ///
    /// Ships with batteries use the firing battery's own damage dice.
    pub default_damage_dice: String,

    // === HAZARD PHASE ===
    /// Per-ship chance of encountering an environmental hazard each round
    pub hazard_chance: f32,

    /// Efficiency lost by a random system on a System Failure hazard
    pub hazard_system_damage: u8,

    /// Efficiency lost by every system on a Radiation Burst hazard
    pub radiation_system_damage: u8,

    /// Hull damage rolled when a ship strikes a mine
    pub mine_damage_dice: String,

    // === MISSILE PHASE ===
    /// Damage rolled per missile launch
    ///
    /// Missiles bypass the shield save entirely.
    pub missile_damage_dice: String,

    // === BOARDING PHASE ===
    /// Per-ship chance of attempting a boarding action each round
    pub boarding_chance: f32,

    /// Contested roll added to the attacker's boarding strength
    pub boarding_attack_dice: String,

    /// Hull damage dealt by a successful boarding action
    pub boarding_damage_dice: String,

    // === REPAIR PHASE ===
    /// Chance a damaged ship effects repairs this round
    ///
    /// Ships whose order grants repair priority always repair.
    pub repair_chance: f32,

    /// Efficiency restored to one system by a successful repair
    pub repair_amount: u8,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            rounds: 3,

            attack_dice: "2d20+2".into(),
            hit_threshold: 28,
            shield_save_dice: "1d100".into(),
            default_damage_dice: "2d10".into(),

            hazard_chance: 0.1,
            hazard_system_damage: 10,
            radiation_system_damage: 5,
            mine_damage_dice: "1d6".into(),

            missile_damage_dice: "3d6".into(),

            boarding_chance: 0.2,
            boarding_attack_dice: "1d20".into(),
            boarding_damage_dice: "1d10".into(),

            repair_chance: 0.5,
            repair_amount: 10,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    ///
    /// Every dice expression is parsed up front so a malformed one aborts
    /// the run before any round starts, not in the middle of one.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(SimError::InvalidConfig("rounds must be >= 1".into()));
        }

        for expr in [
            &self.attack_dice,
            &self.shield_save_dice,
            &self.default_damage_dice,
            &self.mine_damage_dice,
            &self.missile_damage_dice,
            &self.boarding_attack_dice,
            &self.boarding_damage_dice,
        ] {
            DiceExpr::parse(expr)?;
        }

        for (name, chance) in [
            ("hazard_chance", self.hazard_chance),
            ("boarding_chance", self.boarding_chance),
            ("repair_chance", self.repair_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(SimError::InvalidConfig(format!(
                    "{} ({}) must be within 0.0..=1.0",
                    name, chance
                )));
            }
        }

        for (name, amount) in [
            ("hazard_system_damage", self.hazard_system_damage),
            ("radiation_system_damage", self.radiation_system_damage),
            ("repair_amount", self.repair_amount),
        ] {
            if amount > 100 {
                return Err(SimError::InvalidConfig(format!(
                    "{} ({}) must be within 0..=100",
                    name, amount
                )));
            }
        }

        if self.hit_threshold <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "hit_threshold ({}) must be positive",
                self.hit_threshold
            )));
        }

        Ok(())
    }
}
