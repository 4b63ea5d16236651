//! Repair phase
//!
//! Damage control crews patch one damaged subsystem per round. Hull is
//! never repaired; only systems are.

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::{Ship, SystemStatus};

pub fn repair_phase(
    fleet: &mut [Ship],
    config: &BattleConfig,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) -> Result<()> {
    for ship in fleet.iter_mut() {
        if !ship.is_alive() {
            continue;
        }
        let damaged: Vec<String> = ship
            .systems
            .iter()
            .filter(|(_, s)| s.status != SystemStatus::Operational)
            .map(|(name, _)| name.clone())
            .collect();
        if damaged.is_empty() {
            continue;
        }

        let chance = if ship.repair_priority {
            1.0
        } else {
            config.repair_chance
        };
        if !roller.chance(chance) {
            continue;
        }

        let name = &damaged[roller.pick(damaged.len())];
        let system = ship.systems.get_mut(name).expect("picked key exists");
        system.repair(config.repair_amount);
        log.push(
            BattleEventType::SystemRepaired {
                ship: ship.name.clone(),
                system: name.clone(),
            },
            format!(
                "{} repairs {} to {}%",
                ship.name, name, system.efficiency
            ),
            round,
        );
    }
    Ok(())
}
