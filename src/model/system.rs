//! Ship subsystems (engines, shields, targeting, ...)
//!
//! Systems live and die with their owning ship. Damage lowers efficiency;
//! status degrades at the critical threshold and a system goes offline
//! only when efficiency bottoms out at zero.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Operating state of a subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SystemStatus {
    #[default]
    Operational,
    Degraded,
    Offline,
}

/// One subsystem of a ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSystem {
    #[serde(default)]
    pub status: SystemStatus,
    /// Current efficiency, always within 0..=100
    pub efficiency: u8,
    /// Status becomes Degraded once efficiency falls to or below this value
    pub critical_threshold: u8,
    /// Free-text consequence shown when the system goes offline
    #[serde(default)]
    pub effect: String,
}

impl ShipSystem {
    /// Create a validated subsystem
    ///
    /// Out-of-range efficiency or threshold is a fatal configuration error.
    pub fn new(efficiency: u8, critical_threshold: u8, effect: impl Into<String>) -> Result<Self> {
        let mut system = Self {
            status: SystemStatus::Operational,
            efficiency,
            critical_threshold,
            effect: effect.into(),
        };
        system.validate()?;
        system.update_status();
        Ok(system)
    }

    /// Check the 0..=100 bounds
    pub fn validate(&self) -> Result<()> {
        if self.efficiency > 100 {
            return Err(SimError::InvalidConfig(format!(
                "system efficiency ({}) must be within 0..=100",
                self.efficiency
            )));
        }
        if self.critical_threshold > 100 {
            return Err(SimError::InvalidConfig(format!(
                "system critical threshold ({}) must be within 0..=100",
                self.critical_threshold
            )));
        }
        Ok(())
    }

    /// Apply damage, lowering efficiency and updating status
    pub fn damage(&mut self, amount: u8) {
        self.efficiency = self.efficiency.saturating_sub(amount);
        self.update_status();
    }

    /// Repair the system towards full efficiency
    ///
    /// Offline systems are beyond field repair.
    pub fn repair(&mut self, amount: u8) {
        if self.status == SystemStatus::Offline {
            return;
        }
        self.efficiency = self.efficiency.saturating_add(amount).min(100);
        self.update_status();
    }

    fn update_status(&mut self) {
        // Offline is sticky: a dead system stays dead
        if self.status == SystemStatus::Offline {
            return;
        }
        self.status = if self.efficiency == 0 {
            SystemStatus::Offline
        } else if self.efficiency <= self.critical_threshold {
            SystemStatus::Degraded
        } else {
            SystemStatus::Operational
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_bounds() {
        assert!(ShipSystem::new(100, 50, "").is_ok());
        assert!(ShipSystem::new(101, 50, "").is_err());
        assert!(ShipSystem::new(80, 101, "").is_err());
    }

    #[test]
    fn test_damage_degrades_at_threshold() {
        let mut system = ShipSystem::new(60, 50, "Speed halved").unwrap();
        system.damage(5);
        assert_eq!(system.status, SystemStatus::Operational);
        system.damage(5);
        // 50 <= critical_threshold
        assert_eq!(system.status, SystemStatus::Degraded);
        assert_eq!(system.efficiency, 50);
    }

    #[test]
    fn test_offline_only_at_zero() {
        let mut system = ShipSystem::new(10, 50, "").unwrap();
        assert_eq!(system.status, SystemStatus::Degraded);
        system.damage(9);
        assert_eq!(system.status, SystemStatus::Degraded);
        system.damage(1);
        assert_eq!(system.status, SystemStatus::Offline);
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut system = ShipSystem::new(5, 50, "").unwrap();
        system.damage(50);
        assert_eq!(system.efficiency, 0);
        assert_eq!(system.status, SystemStatus::Offline);
    }

    #[test]
    fn test_repair_restores_operational() {
        let mut system = ShipSystem::new(45, 50, "").unwrap();
        assert_eq!(system.status, SystemStatus::Degraded);
        system.repair(10);
        assert_eq!(system.efficiency, 55);
        assert_eq!(system.status, SystemStatus::Operational);
    }

    #[test]
    fn test_repair_caps_at_hundred() {
        let mut system = ShipSystem::new(95, 50, "").unwrap();
        system.repair(20);
        assert_eq!(system.efficiency, 100);
    }

    #[test]
    fn test_repair_saturates_instead_of_overflowing() {
        // 99 + 200 overflows u8; the sum must saturate, then clamp
        let mut system = ShipSystem::new(99, 50, "").unwrap();
        system.repair(200);
        assert_eq!(system.efficiency, 100);
        assert_eq!(system.status, SystemStatus::Operational);
    }

    #[test]
    fn test_offline_system_cannot_be_repaired() {
        let mut system = ShipSystem::new(5, 50, "").unwrap();
        system.damage(5);
        assert_eq!(system.status, SystemStatus::Offline);
        system.repair(50);
        assert_eq!(system.efficiency, 0);
        assert_eq!(system.status, SystemStatus::Offline);
    }
}
