//! # Mechanisms Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of drive actuators on the vehicle.
pub const NUM_DRV_ACTS: usize = 4;

/// Drive actuators in archive/report order.
pub const DRV_IDS: [ActId; NUM_DRV_ACTS] = [
    ActId::DrvFL,
    ActId::DrvBL,
    ActId::DrvFR,
    ActId::DrvBR,
];

/// All closed loop actuators on the vehicle.
pub const ALL_IDS: [ActId; 5] = [
    ActId::DrvFL,
    ActId::DrvBL,
    ActId::DrvFR,
    ActId::DrvBR,
    ActId::Tower,
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands produced by a control module for one cycle, to be written to the mechanisms.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MechDems {
    /// Velocity or position demand per actuator, interpreted according to the closed loop mode
    /// the actuator is configured in.
    pub dems: BTreeMap<ActId, f64>,

    /// Demanded state of the binary (solenoid) actuators.
    pub binary: BTreeMap<BinActId, BinaryState>,

    /// Actuators whose closed loop integral accumulator shall be cleared before the demands
    /// are written.
    pub reset_iaccum: Vec<ActId>,
}

/// Gains of an actuator's closed loop controller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all closed loop actuators available to the vehicle
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum ActId {
    DrvFL,
    DrvBL,
    DrvFR,
    DrvBR,
    /// The arm motor mounted on the tower
    Tower,
}

/// IDs of the binary (double solenoid) actuators
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum BinActId {
    GearShift,
}

/// State of a double solenoid.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum BinaryState {
    /// High gear for the gear shifter
    Forward,
    /// Low gear for the gear shifter
    Reverse,
}

/// Closed loop control mode of an actuator.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
pub enum LoopMode {
    Position,
    Velocity,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ActId {
    /// Returns `true` if this is one of the drive actuators.
    pub fn is_drive(&self) -> bool {
        !matches!(self, ActId::Tower)
    }
}

impl BinaryState {
    /// The gear shifter state for the given gear.
    pub fn from_high_gear(high_gear: bool) -> Self {
        match high_gear {
            true => BinaryState::Forward,
            false => BinaryState::Reverse,
        }
    }
}

impl MechDems {
    /// Demands which hold every closed loop actuator at zero.
    pub fn zeroed() -> Self {
        Self {
            dems: ALL_IDS.iter().map(|id| (*id, 0.0)).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zeroed() {
        let dems = MechDems::zeroed();
        assert_eq!(dems.dems.len(), 5);
        assert!(dems.dems.values().all(|d| *d == 0.0));
        assert!(dems.binary.is_empty());
        assert!(dems.reset_iaccum.is_empty());
    }

    #[test]
    fn test_drive_ids() {
        assert!(DRV_IDS.iter().all(ActId::is_drive));
        assert!(!ActId::Tower.is_drive());
    }

    #[test]
    fn test_gear_state() {
        assert_eq!(BinaryState::from_high_gear(true), BinaryState::Forward);
        assert_eq!(BinaryState::from_high_gear(false), BinaryState::Reverse);
    }
}
