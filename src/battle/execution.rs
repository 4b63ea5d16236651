//! Battle execution loop
//!
//! Each round: orders -> hazards -> shooting -> missiles -> boarding -> repair

use serde::{Deserialize, Serialize};

use crate::battle::boarding::boarding_phase;
use crate::battle::hazards::{resolve_hazards, Hazard};
use crate::battle::missiles::missile_phase;
use crate::battle::orders::{select_orders, BattleOrder};
use crate::battle::repair::repair_phase;
use crate::battle::resolution::shooting_phase;
use crate::core::config::BattleConfig;
use crate::core::error::Result;
use crate::dice::Roller;
use crate::model::Ship;

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Setup, // Fleet assembled, nothing rolled yet
    RoundInProgress, // Rounds being resolved
    Complete,        // All rounds run, report available
}

/// Log entry for battle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: u32,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BattleEventType {
    RoundStarted,
    OrderSelected { ship: String, order: BattleOrder },
    HazardStruck { ship: String, hazard: Hazard },
    AttackMissed { attacker: String, target: String },
    ShieldAbsorbed { attacker: String, target: String },
    ShipHit { attacker: String, target: String, damage: i32 },
    SplashDamage { attacker: String, target: String, damage: i32 },
    MissileLaunched { attacker: String, target: String, damage: i32 },
    BoardingRepelled { attacker: String, target: String },
    BoardingAction { attacker: String, target: String, damage: i32 },
    SystemRepaired { ship: String, system: String },
    ShipDestroyed { ship: String },
    BattleEnded,
}

/// Append-only narrative log of a battle
///
/// Captured as a sequence of records rather than console output so tests
/// can assert on it directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String, round: u32) {
        self.events.push(BattleEvent {
            round,
            event_type,
            description,
        });
    }
}

/// One line of the final status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipReport {
    pub name: String,
    pub class_name: String,
    pub destroyed: bool,
    /// Hull at end of battle; for destroyed ships, the value recorded at
    /// the moment of destruction
    pub hull: i32,
}

/// Complete battle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub fleet: Vec<Ship>,
    pub config: BattleConfig,
    pub round: u32,
    pub phase: BattlePhase,
    pub battle_log: BattleEventLog,
}

impl BattleState {
    /// Assemble a battle, validating config and every ship up front
    ///
    /// A malformed dice expression or an out-of-bounds stat aborts here,
    /// before any roll is consumed.
    pub fn new(fleet: Vec<Ship>, config: BattleConfig) -> Result<Self> {
        config.validate()?;
        for ship in &fleet {
            ship.validate()?;
        }
        Ok(Self {
            fleet,
            config,
            round: 0,
            phase: BattlePhase::Setup,
            battle_log: BattleEventLog::new(),
        })
    }

    /// Is the battle finished?
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, BattlePhase::Complete)
    }

    /// Resolve a single round
    ///
    /// Order selection runs across the whole fleet before any attack;
    /// attacker order is fleet iteration order, never randomized. Results
    /// already applied stay applied if a later roll fails.
    pub fn run_round(&mut self, roller: &mut dyn Roller) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        self.phase = BattlePhase::RoundInProgress;
        self.round += 1;
        let round = self.round;
        tracing::debug!(round, "round starting");

        self.battle_log.push(
            BattleEventType::RoundStarted,
            format!("=== ROUND {} ===", round),
            round,
        );

        let config = self.config.clone();
        select_orders(&mut self.fleet, roller, &mut self.battle_log, round);
        resolve_hazards(&mut self.fleet, &config, roller, &mut self.battle_log, round)?;
        shooting_phase(&mut self.fleet, &config, roller, &mut self.battle_log, round)?;
        missile_phase(&mut self.fleet, &config, roller, &mut self.battle_log, round)?;
        boarding_phase(&mut self.fleet, &config, roller, &mut self.battle_log, round)?;
        repair_phase(&mut self.fleet, &config, roller, &mut self.battle_log, round)?;

        if self.round >= self.config.rounds {
            self.phase = BattlePhase::Complete;
            self.battle_log.push(
                BattleEventType::BattleEnded,
                "--- Battle Over ---".into(),
                round,
            );
            tracing::info!(rounds = self.round, "battle complete");
        }
        Ok(())
    }

    /// Run every configured round to completion
    ///
    /// The loop runs the full round count even if only one ship (or none)
    /// remains alive; there is no early exit.
    pub fn run(&mut self, roller: &mut dyn Roller) -> Result<()> {
        while !self.is_complete() {
            self.run_round(roller)?;
        }
        Ok(())
    }

    /// Final status: every ship with its alive/destroyed state and hull
    pub fn final_report(&self) -> Vec<ShipReport> {
        self.fleet
            .iter()
            .map(|ship| ShipReport {
                name: ship.name.clone(),
                class_name: ship.class_name.clone(),
                destroyed: ship.destroyed,
                hull: ship.hull,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::SeededRoller;
    use crate::fleet::setup::new_ship;
    use crate::model::WeaponSystem;

    fn two_ship_fleet() -> Vec<Ship> {
        vec![
            new_ship("Aurora", "Light Cruiser", 80, 65, WeaponSystem::default(), 0).unwrap(),
            new_ship("Warden", "Battleship", 100, 80, WeaponSystem::default(), 0).unwrap(),
        ]
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = BattleState::new(two_ship_fleet(), BattleConfig::default()).unwrap();
        assert_eq!(state.phase, BattlePhase::Setup);

        let mut roller = SeededRoller::seed_from_u64(1);
        state.run_round(&mut roller).unwrap();
        assert_eq!(state.phase, BattlePhase::RoundInProgress);
        assert_eq!(state.round, 1);

        state.run(&mut roller).unwrap();
        assert_eq!(state.phase, BattlePhase::Complete);
        assert_eq!(state.round, 3);
    }

    #[test]
    fn test_run_executes_exactly_configured_rounds() {
        let mut config = BattleConfig::default();
        config.rounds = 5;
        let mut state = BattleState::new(two_ship_fleet(), config).unwrap();
        let mut roller = SeededRoller::seed_from_u64(2);

        state.run(&mut roller).unwrap();
        assert_eq!(state.round, 5);

        // Complete is terminal; further calls are no-ops
        state.run_round(&mut roller).unwrap();
        assert_eq!(state.round, 5);
    }

    #[test]
    fn test_invalid_ship_rejected_at_setup() {
        let mut fleet = two_ship_fleet();
        fleet[0].shield = 200;
        assert!(BattleState::new(fleet, BattleConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_config_rejected_at_setup() {
        let mut config = BattleConfig::default();
        config.shield_save_dice = "1dd00".into();
        assert!(BattleState::new(two_ship_fleet(), config).is_err());
    }

    #[test]
    fn test_final_report_covers_every_ship() {
        let mut state = BattleState::new(two_ship_fleet(), BattleConfig::default()).unwrap();
        let mut roller = SeededRoller::seed_from_u64(3);
        state.run(&mut roller).unwrap();

        let report = state.final_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Aurora");
        for (line, ship) in report.iter().zip(&state.fleet) {
            assert_eq!(line.hull, ship.hull);
            assert_eq!(line.destroyed, ship.destroyed);
        }
    }

    #[test]
    fn test_orders_assigned_before_any_attack_each_round() {
        let mut state = BattleState::new(two_ship_fleet(), BattleConfig::default()).unwrap();
        let mut roller = SeededRoller::seed_from_u64(4);
        state.run_round(&mut roller).unwrap();

        let round_one: Vec<_> = state.battle_log.events.iter().collect();
        let first_order = round_one
            .iter()
            .position(|e| matches!(e.event_type, BattleEventType::OrderSelected { .. }))
            .expect("orders logged");
        let first_attack = round_one.iter().position(|e| {
            matches!(
                e.event_type,
                BattleEventType::AttackMissed { .. }
                    | BattleEventType::ShipHit { .. }
                    | BattleEventType::ShieldAbsorbed { .. }
            )
        });
        if let Some(first_attack) = first_attack {
            assert!(first_order < first_attack);
        }
    }
}
