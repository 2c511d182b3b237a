//! # Mechanisms Client
//!
//! Writes the demands produced by the control modules to the mechanisms. This is the boundary at
//! which drive demands are limited to the range the actuators accept.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use comms_if::eqpt::mech::{ActId, MechDems};
use util::maths::clamp_abs;

use crate::hal::MechInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Limits applied to demands when they are written.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemLimits {
    /// Largest magnitude of a drive actuator demand. Non-drive actuators are not limited.
    pub drv_dem_limit: f64,
}

/// What was actually written to the mechanisms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendReport {
    /// The demand written to each actuator, after limiting.
    pub written: BTreeMap<ActId, f64>,

    /// Actuators whose demand had to be limited.
    pub limited: Vec<ActId>,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Write a set of demands to the mechanisms.
///
/// Integral accumulators are cleared first, then the closed loop demands are written in actuator
/// order, then the binary actuators are set.
pub fn send_demands<M>(mech: &mut M, dems: &MechDems, limits: &DemLimits) -> SendReport
where
    M: MechInterface + ?Sized
{
    let mut report = SendReport::default();

    for id in dems.reset_iaccum.iter() {
        mech.reset_iaccum(*id);
    }

    for (id, dem) in dems.dems.iter() {
        let dem = match id.is_drive() {
            true => {
                let (limited_dem, limited) = clamp_abs(dem, &limits.drv_dem_limit);
                if limited {
                    warn!(
                        "{:?} demand of {:.4} exceeds the limit of {}, limiting", 
                        id, dem, limits.drv_dem_limit
                    );
                    report.limited.push(*id);
                }
                limited_dem
            },
            false => *dem
        };

        mech.set_dem(*id, dem);
        report.written.insert(*id, dem);
    }

    for (id, state) in dems.binary.iter() {
        mech.set_binary(*id, *state);
    }

    report
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::mech::{BinActId, BinaryState};
    use crate::hal::sim::{MechCall, SimMech};

    #[test]
    fn test_send_order_and_limits() {
        let mut dems = MechDems::default();
        dems.dems.insert(ActId::Tower, 11000.0);
        dems.dems.insert(ActId::DrvFR, -1.4);
        dems.dems.insert(ActId::DrvFL, 1.4);
        dems.dems.insert(ActId::DrvBL, 0.7);
        dems.binary.insert(BinActId::GearShift, BinaryState::Reverse);
        dems.reset_iaccum = vec![ActId::DrvFL];

        let mut mech = SimMech::new();
        let report = send_demands(&mut mech, &dems, &DemLimits { drv_dem_limit: 1.0 });

        assert_eq!(mech.take_calls(), vec![
            MechCall::ResetIaccum(ActId::DrvFL),
            MechCall::SetDem(ActId::DrvFL, 1.0),
            MechCall::SetDem(ActId::DrvBL, 0.7),
            MechCall::SetDem(ActId::DrvFR, -1.0),
            MechCall::SetDem(ActId::Tower, 11000.0),
            MechCall::SetBinary(BinActId::GearShift, BinaryState::Reverse),
        ]);

        assert_eq!(report.limited, vec![ActId::DrvFL, ActId::DrvFR]);
        assert_eq!(report.written[&ActId::Tower], 11000.0);
    }

    #[test]
    fn test_send_to_trait_object() {
        let mut sim = SimMech::new();
        let mech: &mut dyn MechInterface = &mut sim;

        let report = send_demands(mech, &MechDems::zeroed(), &DemLimits { drv_dem_limit: 1.0 });

        assert!(report.limited.is_empty());
        assert_eq!(report.written.len(), 5);
        assert_eq!(sim.calls().len(), 5);
    }
}
