//! Boarding phase
//!
//! A contested roll of boarding strengths. Success tears up the target's
//! hull from the inside.

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::battle::resolution::target_candidates;
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::Ship;

pub fn boarding_phase(
    fleet: &mut [Ship],
    config: &BattleConfig,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) -> Result<()> {
    for attacker_idx in 0..fleet.len() {
        if !fleet[attacker_idx].is_alive() {
            continue;
        }
        if !roller.chance(config.boarding_chance) {
            continue;
        }
        let candidates = target_candidates(fleet, attacker_idx);
        if candidates.is_empty() {
            continue;
        }
        let target_idx = candidates[roller.pick(candidates.len())];

        let attacker_name = fleet[attacker_idx].name.clone();
        let target_name = fleet[target_idx].name.clone();

        let roll = roller.roll(&config.boarding_attack_dice)?;
        let attack_total =
            roll.total + fleet[attacker_idx].boarding_strength + fleet[attacker_idx].attack_mod;
        let defend_total = fleet[target_idx].boarding_strength + fleet[target_idx].defense_mod;

        if attack_total <= defend_total {
            log.push(
                BattleEventType::BoardingRepelled {
                    attacker: attacker_name.clone(),
                    target: target_name.clone(),
                },
                format!("{} fails to board {}", attacker_name, target_name),
                round,
            );
            continue;
        }

        let damage = roller.roll(&config.boarding_damage_dice)?.total.max(0);
        let destroyed = fleet[target_idx].take_damage(damage);
        log.push(
            BattleEventType::BoardingAction {
                attacker: attacker_name.clone(),
                target: target_name.clone(),
                damage,
            },
            format!(
                "{} boards {} for {} damage (hull {})",
                attacker_name, target_name, damage, fleet[target_idx].hull
            ),
            round,
        );
        if destroyed {
            log.push(
                BattleEventType::ShipDestroyed {
                    ship: target_name.clone(),
                },
                format!("{} captured and destroyed!", target_name),
                round,
            );
        }
    }
    Ok(())
}
