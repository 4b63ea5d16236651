//! Missile phase
//!
//! Ships with ordnance left expend one missile per round at a random
//! living target. Missiles track through shields: no to-hit roll, no
//! shield save.

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::battle::resolution::target_candidates;
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::Ship;

pub fn missile_phase(
    fleet: &mut [Ship],
    config: &BattleConfig,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) -> Result<()> {
    for attacker_idx in 0..fleet.len() {
        if !fleet[attacker_idx].is_alive() || fleet[attacker_idx].weapons.missiles == 0 {
            continue;
        }
        let candidates = target_candidates(fleet, attacker_idx);
        if candidates.is_empty() {
            continue;
        }
        let target_idx = candidates[roller.pick(candidates.len())];

        fleet[attacker_idx].weapons.missiles -= 1;
        let attacker_name = fleet[attacker_idx].name.clone();
        let target_name = fleet[target_idx].name.clone();

        let damage = roller.roll(&config.missile_damage_dice)?.total.max(0);
        let destroyed = fleet[target_idx].take_damage(damage);
        log.push(
            BattleEventType::MissileLaunched {
                attacker: attacker_name.clone(),
                target: target_name.clone(),
                damage,
            },
            format!(
                "{} launches missile at {} for {} (hull {})",
                attacker_name, target_name, damage, fleet[target_idx].hull
            ),
            round,
        );
        if destroyed {
            log.push(
                BattleEventType::ShipDestroyed {
                    ship: target_name.clone(),
                },
                format!("{} destroyed by missile!", target_name),
                round,
            );
        }
    }
    Ok(())
}
