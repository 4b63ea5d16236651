//! Ship construction helpers and the demo fleet

use std::collections::BTreeMap;

use crate::core::error::Result;
use crate::model::weapons::{FiringArc, RangeBand, SpecialTrait, WeaponBattery};
use crate::model::{Ship, ShipSystem, WeaponSystem};

/// Create a subsystem with the common defaults
pub fn system_block(efficiency: u8, critical_threshold: u8, effect: &str) -> Result<ShipSystem> {
    ShipSystem::new(efficiency, critical_threshold, effect)
}

/// Thin constructor for a baseline ship
///
/// Crew and handling stats get frigate-grade values; callers tune the
/// fields they care about afterwards. The result is already validated.
pub fn new_ship(
    name: &str,
    class_name: &str,
    hull: i32,
    shield: i32,
    mut weapons: WeaponSystem,
    missiles: u32,
) -> Result<Ship> {
    weapons.missiles = missiles;
    let ship = Ship {
        name: name.into(),
        class_name: class_name.into(),
        ai: String::new(),
        hull,
        shield,
        crew: 1,
        leadership: 1,
        boarding_strength: 1,
        speed: 10,
        maneuver: 1,
        weapons,
        systems: BTreeMap::new(),
        order: None,
        range: RangeBand::Standard,
        attack_mod: 0,
        defense_mod: 0,
        repair_priority: false,
        destroyed: false,
    };
    ship.validate()?;
    Ok(ship)
}

/// The two demo cruisers used by the CLI when no fleet file is given
pub fn demo_fleet() -> Result<Vec<Ship>> {
    let aurora_weapons = WeaponSystem::new(
        vec![
            WeaponBattery {
                name: "Lance Battery".into(),
                rating: 3,
                accuracy: 1,
                arc: FiringArc::Fore,
                damage_dice: "2d6".into(),
                range: RangeBand::Long,
                special: None,
            },
            WeaponBattery {
                name: "Macro Cannon".into(),
                rating: 2,
                accuracy: 0,
                arc: FiringArc::Port,
                damage_dice: "3d6".into(),
                range: RangeBand::Standard,
                special: None,
            },
        ],
        4,
    );

    let mut aurora = Ship {
        name: "Aurora Huntress".into(),
        class_name: "Light Cruiser".into(),
        ai: "Efficient and sarcastic".into(),
        hull: 80,
        shield: 65,
        crew: 2,
        leadership: 7,
        boarding_strength: 1,
        speed: 25,
        maneuver: 2,
        weapons: aurora_weapons,
        systems: BTreeMap::new(),
        order: None,
        range: RangeBand::Standard,
        attack_mod: 0,
        defense_mod: 0,
        repair_priority: false,
        destroyed: false,
    };
    aurora
        .systems
        .insert("engines".into(), system_block(85, 50, "Speed halved when offline")?);
    aurora
        .systems
        .insert("shields".into(), system_block(70, 50, "Hull exposed")?);
    aurora
        .systems
        .insert("targeting".into(), system_block(90, 50, "Attack penalty")?);

    let warden_weapons = WeaponSystem::new(
        vec![WeaponBattery {
            name: "Plasma Broadside".into(),
            rating: 4,
            accuracy: -1,
            arc: FiringArc::Starboard,
            damage_dice: "4d6".into(),
            range: RangeBand::Long,
            special: Some(SpecialTrait::Area),
        }],
        6,
    );

    let mut warden = Ship {
        name: "Celestial Warden".into(),
        class_name: "Battleship".into(),
        ai: "Formal and calculating".into(),
        hull: 100,
        shield: 80,
        crew: 4,
        leadership: 9,
        boarding_strength: 3,
        speed: 18,
        maneuver: 1,
        weapons: warden_weapons,
        systems: BTreeMap::new(),
        order: None,
        range: RangeBand::Standard,
        attack_mod: 0,
        defense_mod: 0,
        repair_priority: false,
        destroyed: false,
    };
    warden
        .systems
        .insert("engines".into(), system_block(90, 50, "Ship immobilised")?);
    warden
        .systems
        .insert("shields".into(), system_block(80, 50, "Hull exposed")?);
    warden.systems.insert(
        "reactor".into(),
        system_block(100, 50, "Catastrophic explosion on failure")?,
    );

    let fleet = vec![aurora, warden];
    for ship in &fleet {
        ship.validate()?;
    }
    Ok(fleet)
}
