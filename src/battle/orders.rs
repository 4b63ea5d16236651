//! Tactical orders and the order-selection phase
//!
//! Each living ship draws one order per round, uniformly at random and
//! independently of every other ship. Orders set the round's attack and
//! defense modifiers before any shot is fired.

use serde::{Deserialize, Serialize};

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::dice::Roller;
use crate::model::Ship;

/// The fixed order vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOrder {
    BraceForImpact,
    LockOn,
    AllPowerToShields,
    ReloadOrdnance,
    BoardingParty,
    FireEverything,
    CombatRepairs,
    Disengage,
    OffensiveManeuvers,
    RunSilent,
}

impl BattleOrder {
    pub const ALL: [BattleOrder; 10] = [
        BattleOrder::BraceForImpact,
        BattleOrder::LockOn,
        BattleOrder::AllPowerToShields,
        BattleOrder::ReloadOrdnance,
        BattleOrder::BoardingParty,
        BattleOrder::FireEverything,
        BattleOrder::CombatRepairs,
        BattleOrder::Disengage,
        BattleOrder::OffensiveManeuvers,
        BattleOrder::RunSilent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BattleOrder::BraceForImpact => "Brace for Impact",
            BattleOrder::LockOn => "Lock On",
            BattleOrder::AllPowerToShields => "All Power to Shields",
            BattleOrder::ReloadOrdnance => "Reload Ordnance",
            BattleOrder::BoardingParty => "Boarding Party",
            BattleOrder::FireEverything => "Fire Everything",
            BattleOrder::CombatRepairs => "Combat Repairs",
            BattleOrder::Disengage => "Disengage",
            BattleOrder::OffensiveManeuvers => "Offensive Maneuvers",
            BattleOrder::RunSilent => "Run Silent",
        }
    }

    pub fn attack_mod(&self) -> i32 {
        match self {
            BattleOrder::LockOn => 2,
            BattleOrder::FireEverything | BattleOrder::OffensiveManeuvers => 1,
            BattleOrder::RunSilent => -1,
            BattleOrder::Disengage => -2,
            _ => 0,
        }
    }

    pub fn defense_mod(&self) -> i32 {
        match self {
            BattleOrder::BraceForImpact => 2,
            BattleOrder::AllPowerToShields
            | BattleOrder::CombatRepairs
            | BattleOrder::Disengage
            | BattleOrder::RunSilent => 1,
            BattleOrder::OffensiveManeuvers => -1,
            _ => 0,
        }
    }

    pub fn repair_priority(&self) -> bool {
        matches!(self, BattleOrder::CombatRepairs)
    }
}

/// Assign exactly one order to every living ship
///
/// Dead ships are skipped without error; they keep whatever order they
/// died with.
pub fn select_orders(fleet: &mut [Ship], roller: &mut dyn Roller, log: &mut BattleEventLog, round: u32) {
    for ship in fleet.iter_mut() {
        if !ship.is_alive() {
            continue;
        }

        let order = BattleOrder::ALL[roller.pick(BattleOrder::ALL.len())];
        ship.order = Some(order);
        ship.attack_mod = order.attack_mod();
        ship.defense_mod = order.defense_mod();
        ship.repair_priority = order.repair_priority();

        log.push(
            BattleEventType::OrderSelected {
                ship: ship.name.clone(),
                order,
            },
            format!("{} selects order: {}", ship.name, order.label()),
            round,
        );
    }
}
