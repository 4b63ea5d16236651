//! Weapon batteries and the per-ship weapon system

use serde::{Deserialize, Serialize};

/// Mounting arc of a battery
///
/// Carried as flavor data on the battery; the simulator has no ship
/// positions, so arcs never gate fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringArc {
    #[default]
    Fore,
    Aft,
    Port,
    Starboard,
    Omni,
}

/// Coarse distance category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBand {
    Point,
    Short,
    #[default]
    Standard,
    Long,
}

/// Special behavior tag altering damage resolution
///
/// Piercing batteries skip the target's shield save. Area batteries
/// splash half their damage roll onto a second target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTrait {
    Area,
    Piercing,
}

/// A single turret or mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponBattery {
    pub name: String,
    /// Strength contributed to the ship's total offensive rating
    pub rating: i32,
    /// To-hit modifier added to the attack roll
    #[serde(default)]
    pub accuracy: i32,
    #[serde(default)]
    pub arc: FiringArc,
    /// Damage expression rolled when this battery lands a penetrating hit
    pub damage_dice: String,
    #[serde(default)]
    pub range: RangeBand,
    #[serde(default)]
    pub special: Option<SpecialTrait>,
}

/// All of a ship's armament: an ordered battery list plus a missile magazine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSystem {
    #[serde(default)]
    pub batteries: Vec<WeaponBattery>,
    #[serde(default)]
    pub missiles: u32,
}

impl WeaponSystem {
    pub fn new(batteries: Vec<WeaponBattery>, missiles: u32) -> Self {
        Self {
            batteries,
            missiles,
        }
    }

    /// Aggregate rating of all batteries
    ///
    /// Recomputed on every read so battery mutations are reflected
    /// immediately. Never cached.
    pub fn rating(&self) -> i32 {
        self.batteries.iter().map(|b| b.rating).sum()
    }

    pub fn add_battery(&mut self, battery: WeaponBattery) {
        self.batteries.push(battery);
    }

    /// The battery a ship fires with: highest rating, first on a tie
    pub fn best_battery(&self) -> Option<&WeaponBattery> {
        let mut best: Option<&WeaponBattery> = None;
        for battery in &self.batteries {
            match best {
                Some(current) if battery.rating <= current.rating => {}
                _ => best = Some(battery),
            }
        }
        best
    }
}
