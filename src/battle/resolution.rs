//! Shooting phase: the core combat resolver
//!
//! For each living ship in fleet order: pick a living target, roll to hit
//! against the hit threshold, roll the target's shield save, roll damage,
//! apply it, check destruction. Ships with no valid target skip their
//! attack; that is an expected condition, not an error.

use crate::battle::execution::{BattleEventLog, BattleEventType};
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::weapons::SpecialTrait;
use crate::model::Ship;

/// Indices of all living ships other than the attacker
pub fn target_candidates(fleet: &[Ship], attacker: usize) -> Vec<usize> {
    (0..fleet.len())
        .filter(|&i| i != attacker && fleet[i].is_alive())
        .collect()
}

/// Firing solution snapshot taken before the target is mutated
struct FiringSolution {
    battery: Option<String>,
    accuracy: i32,
    damage_dice: String,
    special: Option<SpecialTrait>,
}

impl FiringSolution {
    /// A ship fires with its best battery, or a fallback barrage when it
    /// carries none
    fn for_ship(ship: &Ship, config: &BattleConfig) -> Self {
        match ship.weapons.best_battery() {
            Some(battery) => Self {
                battery: Some(battery.name.clone()),
                accuracy: battery.accuracy,
                damage_dice: battery.damage_dice.clone(),
                special: battery.special,
            },
            None => Self {
                battery: None,
                accuracy: 0,
                damage_dice: config.default_damage_dice.clone(),
                special: None,
            },
        }
    }

    fn describe(&self) -> String {
        match &self.battery {
            Some(name) => format!(" with {}", name),
            None => String::new(),
        }
    }
}

/// Resolve shooting for the whole fleet, in fleet iteration order
pub fn shooting_phase(
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

        let candidates = target_candidates(fleet, attacker_idx);
        if candidates.is_empty() {
            // no valid target left; the ship holds fire
            continue;
        }
        let target_idx = candidates[roller.pick(candidates.len())];

        let attacker_name = fleet[attacker_idx].name.clone();
        let attack_mod = fleet[attacker_idx].attack_mod;
        let solution = FiringSolution::for_ship(&fleet[attacker_idx], config);

        let attack = roller.roll(&config.attack_dice)?;
        let attack_total = attack.total + attack_mod + solution.accuracy;
        let target_name = fleet[target_idx].name.clone();
        let to_beat = config.hit_threshold + fleet[target_idx].defense_mod;

        if attack_total <= to_beat {
            log.push(
                BattleEventType::AttackMissed {
                    attacker: attacker_name.clone(),
                    target: target_name.clone(),
                },
                format!(
                    "{} misses {}{} ({} vs {})",
                    attacker_name,
                    target_name,
                    solution.describe(),
                    attack_total,
                    to_beat
                ),
                round,
            );
            continue;
        }

        // Piercing batteries punch straight through the shield envelope
        if solution.special != Some(SpecialTrait::Piercing) {
            let save = roller.roll(&config.shield_save_dice)?;
            if save.total <= fleet[target_idx].shield {
                log.push(
                    BattleEventType::ShieldAbsorbed {
                        attacker: attacker_name.clone(),
                        target: target_name.clone(),
                    },
                    format!(
                        "{}'s shields absorb the hit from {} (save {} vs {})",
                        target_name, attacker_name, save.total, fleet[target_idx].shield
                    ),
                    round,
                );
                continue;
            }
        }

        let damage = roller.roll(&solution.damage_dice)?.total.max(0);
        let destroyed = fleet[target_idx].take_damage(damage);
        log.push(
            BattleEventType::ShipHit {
                attacker: attacker_name.clone(),
                target: target_name.clone(),
                damage,
            },
            format!(
                "{} hits {}{} for {} (hull {})",
                attacker_name,
                target_name,
                solution.describe(),
                damage,
                fleet[target_idx].hull
            ),
            round,
        );
        if destroyed {
            log.push(
                BattleEventType::ShipDestroyed {
                    ship: target_name.clone(),
                },
                format!("{} destroyed!", target_name),
                round,
            );
        }

        // Area batteries wash half the damage roll over a second ship
        if solution.special == Some(SpecialTrait::Area) {
            splash_damage(fleet, attacker_idx, target_idx, damage / 2, &attacker_name, roller, log, round);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn splash_damage(
    fleet: &mut [Ship],
    attacker_idx: usize,
    primary_idx: usize,
    splash: i32,
    attacker_name: &str,
    roller: &mut dyn Roller,
    log: &mut BattleEventLog,
    round: u32,
) {
    if splash <= 0 {
        return;
    }
    let candidates: Vec<usize> = (0..fleet.len())
        .filter(|&i| i != attacker_idx && i != primary_idx && fleet[i].is_alive())
        .collect();
    if candidates.is_empty() {
        return;
    }

    let idx = candidates[roller.pick(candidates.len())];
    let name = fleet[idx].name.clone();
    let destroyed = fleet[idx].take_damage(splash);
    log.push(
        BattleEventType::SplashDamage {
            attacker: attacker_name.to_string(),
            target: name.clone(),
            damage: splash,
        },
        format!(
            "blast wash from {} catches {} for {} (hull {})",
            attacker_name, name, splash, fleet[idx].hull
        ),
        round,
    );
    if destroyed {
        log.push(
            BattleEventType::ShipDestroyed { ship: name.clone() },
            format!("{} destroyed!", name),
            round,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::core::error::SimError;
    use crate::dice::DiceRoll;
    use crate::fleet::setup::new_ship;
    use crate::model::weapons::{FiringArc, RangeBand, WeaponBattery};
    use crate::model::WeaponSystem;

    /// Replays a fixed script of roll totals and target picks
    struct ScriptedRoller {
        totals: VecDeque<i32>,
        picks: VecDeque<usize>,
    }

    impl ScriptedRoller {
        fn new(totals: &[i32], picks: &[usize]) -> Self {
            Self {
                totals: totals.iter().copied().collect(),
                picks: picks.iter().copied().collect(),
            }
        }
    }

    impl Roller for ScriptedRoller {
        fn roll(&mut self, _expr: &str) -> Result<DiceRoll> {
            let total = self.totals.pop_front().expect("roll script exhausted");
            Ok(DiceRoll {
                total,
                explanation: format!("scripted = {}", total),
            })
        }

        fn pick(&mut self, len: usize) -> usize {
            self.picks.pop_front().expect("pick script exhausted").min(len - 1)
        }

        fn chance(&mut self, _probability: f32) -> bool {
            false
        }
    }

    fn ship(name: &str, hull: i32, shield: i32) -> Ship {
        new_ship(name, "Frigate", hull, shield, WeaponSystem::default(), 0).unwrap()
    }

    fn battery(special: Option<SpecialTrait>) -> WeaponBattery {
        WeaponBattery {
            name: "Lance Battery".into(),
            rating: 3,
            accuracy: 0,
            arc: FiringArc::Fore,
            damage_dice: "2d10".into(),
            range: RangeBand::Long,
            special,
        }
    }

    #[test]
    fn test_hit_through_failed_shield_save() {
        let mut fleet = vec![ship("A", 10, 99), ship("B", 10, 0)];
        // A: target B, attack 30 (hit), save 50 > shield 0, damage 7.
        // B: target A, attack 20 (miss).
        let mut roller = ScriptedRoller::new(&[30, 50, 7, 20], &[0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[1].hull, 3);
        assert!(fleet[1].is_alive());
        assert_eq!(fleet[0].hull, 10);
    }

    #[test]
    fn test_shield_absorbs_when_save_not_exceeded() {
        let mut fleet = vec![ship("A", 10, 99), ship("B", 10, 100)];
        // A: attack 30 (hit), save 50 <= shield 100 -> absorbed, no damage roll.
        // B: attack 5 (miss).
        let mut roller = ScriptedRoller::new(&[30, 50, 5], &[0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[1].hull, 10);
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e.event_type, BattleEventType::ShieldAbsorbed { .. })));
    }

    #[test]
    fn test_attack_must_strictly_exceed_threshold() {
        let mut fleet = vec![ship("A", 10, 0), ship("B", 10, 0)];
        // exactly 28 is a miss on both sides
        let mut roller = ScriptedRoller::new(&[28, 28], &[0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[0].hull, 10);
        assert_eq!(fleet[1].hull, 10);
        assert_eq!(
            log.events
                .iter()
                .filter(|e| matches!(e.event_type, BattleEventType::AttackMissed { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_destruction_check_fires_and_dead_ship_does_not_act() {
        let mut fleet = vec![ship("A", 10, 99), ship("B", 5, 0)];
        // A: attack 30, save 60, damage 9 -> B at -4, destroyed.
        // B never acts: no further rolls consumed.
        let mut roller = ScriptedRoller::new(&[30, 60, 9], &[0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert!(!fleet[1].is_alive());
        assert_eq!(fleet[1].hull, -4);
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e.event_type, BattleEventType::ShipDestroyed { .. })));
        assert!(roller.totals.is_empty());
    }

    #[test]
    fn test_sole_survivor_skips_without_error() {
        let mut fleet = vec![ship("A", 10, 50), ship("B", 10, 50)];
        fleet[1].take_damage(20);
        let mut roller = ScriptedRoller::new(&[], &[]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert!(log.events.is_empty());
    }

    #[test]
    fn test_order_modifiers_shift_hit_and_defense() {
        let mut fleet = vec![ship("A", 10, 0), ship("B", 10, 0)];
        fleet[0].attack_mod = 2;
        fleet[1].defense_mod = 2;
        // raw 29 + 2 attack = 31 vs threshold 28 + 2 defense = 30: hit.
        // then save 80, damage 4. B shoots back and misses with 10.
        let mut roller = ScriptedRoller::new(&[29, 80, 4, 10], &[0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[1].hull, 6);
    }

    #[test]
    fn test_piercing_battery_skips_shield_save() {
        let mut fleet = vec![ship("A", 10, 0), ship("B", 10, 100)];
        fleet[0]
            .weapons
            .add_battery(battery(Some(SpecialTrait::Piercing)));
        // A: attack 30, damage 6 immediately (no save roll). B: miss with 3.
        let mut roller = ScriptedRoller::new(&[30, 6, 3], &[0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[1].hull, 4);
    }

    #[test]
    fn test_area_battery_splashes_half_damage() {
        let mut fleet = vec![ship("A", 10, 0), ship("B", 20, 0), ship("C", 20, 0)];
        fleet[0].weapons.add_battery(battery(Some(SpecialTrait::Area)));
        // A targets B: attack 30, save 90, damage 8; splash 4 onto C.
        // B misses (5), C misses (5).
        let mut roller = ScriptedRoller::new(&[30, 90, 8, 5, 5], &[0, 0, 0, 0]);
        let mut log = BattleEventLog::new();

        shooting_phase(&mut fleet, &BattleConfig::default(), &mut roller, &mut log, 1).unwrap();

        assert_eq!(fleet[1].hull, 12);
        assert_eq!(fleet[2].hull, 16);
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e.event_type, BattleEventType::SplashDamage { .. })));
    }

    #[test]
    fn test_malformed_attack_dice_is_fatal() {
        let mut fleet = vec![ship("A", 10, 0), ship("B", 10, 0)];
        let mut config = BattleConfig::default();
        config.attack_dice = "banana".into();
        let mut roller = crate::dice::SeededRoller::seed_from_u64(1);
        let mut log = BattleEventLog::new();

        let err = shooting_phase(&mut fleet, &config, &mut roller, &mut log, 1);
        assert!(matches!(err, Err(SimError::MalformedDice { .. })));
    }
}
