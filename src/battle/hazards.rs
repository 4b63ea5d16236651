//! Environmental hazard phase
//!
//! Each living ship with subsystems risks one random hazard per round.

use serde::{Deserialize, Serialize};

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::Ship;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    SystemFailure,
    GravityWell,
    Minefield,
    Nebula,
    RadiationBurst,
}

impl Hazard {
    pub const ALL: [Hazard; 5] = [
        Hazard::SystemFailure,
        Hazard::GravityWell,
        Hazard::Minefield,
        Hazard::Nebula,
        Hazard::RadiationBurst,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Hazard::SystemFailure => "System Failure",
            Hazard::GravityWell => "Gravity Well",
            Hazard::Minefield => "Minefield",
            Hazard::Nebula => "Nebula",
            Hazard::RadiationBurst => "Radiation Burst",
        }
    }
}

/// Roll hazard encounters across the fleet
pub fn resolve_hazards(
    fleet: &mut [Ship],
    config: &BattleConfig,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) -> Result<()> {
    for ship in fleet.iter_mut() {
        if !ship.is_alive() || ship.systems.is_empty() {
            continue;
        }
        if !roller.chance(config.hazard_chance) {
            continue;
        }
        let hazard = Hazard::ALL[roller.pick(Hazard::ALL.len())];
        apply_hazard(ship, hazard, config, roller, log, round)?;
    }
    Ok(())
}

/// Apply a named hazard effect to a single ship
pub fn apply_hazard(
    ship: &mut Ship,
    hazard: Hazard,
    config: &BattleConfig,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) -> Result<()> {
    let mut newly_destroyed = false;
    let description = match hazard {
        Hazard::SystemFailure => {
            let names: Vec<String> = ship.systems.keys().cloned().collect();
            let name = &names[roller.pick(names.len())];
            let system = ship.systems.get_mut(name).expect("picked key exists");
            system.damage(config.hazard_system_damage);
            format!(
                "hazard damages {}'s {}, now {}%",
                ship.name, name, system.efficiency
            )
        }
        Hazard::GravityWell => {
            ship.attack_mod -= 1;
            ship.defense_mod -= 1;
            format!("{} caught in gravity well: -1 attack and defense", ship.name)
        }
        Hazard::Minefield => {
            let damage = roller.roll(&config.mine_damage_dice)?.total.max(0);
            newly_destroyed = ship.take_damage(damage);
            format!(
                "{} strikes a mine for {} damage (hull {})",
                ship.name, damage, ship.hull
            )
        }
        Hazard::Nebula => {
            ship.attack_mod -= 1;
            format!("{} enters nebula: -1 attack this round", ship.name)
        }
        Hazard::RadiationBurst => {
            for system in ship.systems.values_mut() {
                system.damage(config.radiation_system_damage);
            }
            format!("{} hit by radiation burst: all systems degrade", ship.name)
        }
    };

    log.push(
        BattleEventType::HazardStruck {
            ship: ship.name.clone(),
            hazard,
        },
        description,
        round,
    );
    if newly_destroyed {
        log.push(
            BattleEventType::ShipDestroyed {
                ship: ship.name.clone(),
            },
            format!("{} destroyed!", ship.name),
            round,
        );
    }
    Ok(())
}
