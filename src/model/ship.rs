//! The ship aggregate and its key-style field access facade

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::battle::orders::BattleOrder;
use crate::core::error::{Result, SimError};
use crate::dice::DiceExpr;
use crate::model::system::ShipSystem;
use crate::model::weapons::{RangeBand, WeaponSystem};

/// A scalar view of one ship field, for key-style access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

/// The aggregate root: one ship of the fleet
///
/// A ship exclusively owns its weapon system and all of its subsystems;
/// nothing is shared between ships. A fleet is a plain `Vec<Ship>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    // Identity and flavor
    pub name: String,
    pub class_name: String,
    #[serde(default)]
    pub ai: String,

    // Combat stats
    pub hull: i32,
    pub shield: i32,
    pub crew: u32,
    pub leadership: i32,
    pub boarding_strength: i32,
    pub speed: i32,
    pub maneuver: i32,

    pub weapons: WeaponSystem,
    /// Subsystems keyed by name; BTreeMap keeps iteration deterministic
    #[serde(default)]
    pub systems: BTreeMap<String, ShipSystem>,

    // Tactical state, mutated round by round
    #[serde(default)]
    pub order: Option<BattleOrder>,
    #[serde(default)]
    pub range: RangeBand,
    #[serde(default)]
    pub attack_mod: i32,
    #[serde(default)]
    pub defense_mod: i32,
    #[serde(default)]
    pub repair_priority: bool,
    #[serde(default)]
    pub destroyed: bool,
}

impl Ship {
    /// Validate combat-relevant stats
    ///
    /// Every violation is a fatal configuration error identifying the ship.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| SimError::InvalidShip {
            ship: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(SimError::InvalidShip {
                ship: "<unnamed>".into(),
                reason: "ship name must not be empty".into(),
            });
        }
        if !self.destroyed && self.hull < 1 {
            return Err(invalid(format!("hull ({}) must be >= 1", self.hull)));
        }
        if !(0..=100).contains(&self.shield) {
            return Err(invalid(format!(
                "shield ({}) must be within 0..=100",
                self.shield
            )));
        }
        for (name, system) in &self.systems {
            system
                .validate()
                .map_err(|e| invalid(format!("system '{}': {}", name, e)))?;
        }
        for battery in &self.weapons.batteries {
            DiceExpr::parse(&battery.damage_dice)
                .map_err(|e| invalid(format!("battery '{}': {}", battery.name, e)))?;
        }
        Ok(())
    }

    /// Is the ship still in the fight?
    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    /// Subtract hull damage and run the destruction check
    ///
    /// Hull may go negative here; once the destroyed flag is set, further
    /// damage is ignored and the hull stays frozen at the value recorded
    /// at destruction time. Returns true when the ship was newly destroyed
    /// by this damage.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.destroyed {
            return false;
        }
        self.hull -= amount;
        if self.hull <= 0 {
            self.destroyed = true;
            true
        } else {
            false
        }
    }

    /// Key-style read: `ship.field("hull")` observes the same storage as
    /// `ship.hull`
    ///
    /// This is a mapping-view adapter over the struct, kept for older
    /// key-based call sites. Returns None for unknown keys.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "class_name" => Some(FieldValue::Text(self.class_name.clone())),
            "ai" => Some(FieldValue::Text(self.ai.clone())),
            "hull" => Some(FieldValue::Int(self.hull as i64)),
            "shield" => Some(FieldValue::Int(self.shield as i64)),
            "crew" => Some(FieldValue::Int(self.crew as i64)),
            "leadership" => Some(FieldValue::Int(self.leadership as i64)),
            "boarding_strength" => Some(FieldValue::Int(self.boarding_strength as i64)),
            "speed" => Some(FieldValue::Int(self.speed as i64)),
            "maneuver" => Some(FieldValue::Int(self.maneuver as i64)),
            "attack_mod" => Some(FieldValue::Int(self.attack_mod as i64)),
            "defense_mod" => Some(FieldValue::Int(self.defense_mod as i64)),
            _ => None,
        }
    }

    /// Key-style write, the counterpart of [`Ship::field`]
    ///
    /// Values that do not fit the target field (wrong variant, or an
    /// integer out of the field's range) are rejected, never truncated.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> Result<()> {
        fn narrow<T: TryFrom<i64>>(key: &str, v: i64) -> Result<T> {
            T::try_from(v).map_err(|_| SimError::FieldTypeMismatch {
                field: key.to_string(),
                value: FieldValue::Int(v),
            })
        }

        let mismatch = |value: FieldValue| SimError::FieldTypeMismatch {
            field: key.to_string(),
            value,
        };

        match (key, value) {
            ("name", FieldValue::Text(v)) => self.name = v,
            ("class_name", FieldValue::Text(v)) => self.class_name = v,
            ("ai", FieldValue::Text(v)) => self.ai = v,
            ("hull", FieldValue::Int(v)) => self.hull = narrow(key, v)?,
            ("shield", FieldValue::Int(v)) => self.shield = narrow(key, v)?,
            ("crew", FieldValue::Int(v)) => self.crew = narrow(key, v)?,
            ("leadership", FieldValue::Int(v)) => self.leadership = narrow(key, v)?,
            ("boarding_strength", FieldValue::Int(v)) => self.boarding_strength = narrow(key, v)?,
            ("speed", FieldValue::Int(v)) => self.speed = narrow(key, v)?,
            ("maneuver", FieldValue::Int(v)) => self.maneuver = narrow(key, v)?,
            ("attack_mod", FieldValue::Int(v)) => self.attack_mod = narrow(key, v)?,
            ("defense_mod", FieldValue::Int(v)) => self.defense_mod = narrow(key, v)?,
            (
                "name" | "class_name" | "ai" | "hull" | "shield" | "crew" | "leadership"
                | "boarding_strength" | "speed" | "maneuver" | "attack_mod" | "defense_mod",
                value,
            ) => return Err(mismatch(value)),
            _ => return Err(SimError::UnknownField(key.to_string())),
        }
        Ok(())
    }
}
