//! # Simulated mechanisms
//!
//! [`MechInterface`] implementation with no hardware behind it. Every call is
//! logged and recorded so that the executable can be run on a development
//! machine and tests can check exactly what the control modules asked for.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::Serialize;

use comms_if::eqpt::mech::{ActId, BinActId, BinaryState, LoopMode, PidGains};

use super::MechInterface;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated actuators.
#[derive(Debug, Default)]
pub struct SimMech {
    /// Latest state of each closed loop actuator.
    pub acts: BTreeMap<ActId, SimAct>,

    /// Latest state of each binary actuator.
    pub binary: BTreeMap<BinActId, BinaryState>,

    /// Calls made since the last `take_calls`.
    calls: Vec<MechCall>,
}

/// State of one simulated closed loop actuator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct SimAct {
    pub mode: Option<LoopMode>,
    pub gains: PidGains,
    pub dem: f64,
    pub num_iaccum_resets: u64,
    pub num_zeroed: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A single call to the mechanisms interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MechCall {
    SetDem(ActId, f64),
    SetBinary(BinActId, BinaryState),
    ResetIaccum(ActId),
    ConfigureClosedLoop(ActId, LoopMode, PidGains),
    ZeroPosition(ActId),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of an actuator, the default state if it has never been commanded.
    pub fn act(&self, id: ActId) -> SimAct {
        self.acts.get(&id).copied().unwrap_or_default()
    }

    /// Calls recorded since the last time this function was called.
    pub fn take_calls(&mut self) -> Vec<MechCall> {
        std::mem::take(&mut self.calls)
    }

    /// Calls recorded since the last `take_calls`, without clearing them.
    pub fn calls(&self) -> &[MechCall] {
        &self.calls
    }
}

impl MechInterface for SimMech {
    fn set_dem(&mut self, id: ActId, dem: f64) {
        trace!("{:?} dem = {:.4}", id, dem);
        self.acts.entry(id).or_default().dem = dem;
        self.calls.push(MechCall::SetDem(id, dem));
    }

    fn set_binary(&mut self, id: BinActId, state: BinaryState) {
        trace!("{:?} = {:?}", id, state);
        self.binary.insert(id, state);
        self.calls.push(MechCall::SetBinary(id, state));
    }

    fn reset_iaccum(&mut self, id: ActId) {
        trace!("{:?} integral accumulator cleared", id);
        self.acts.entry(id).or_default().num_iaccum_resets += 1;
        self.calls.push(MechCall::ResetIaccum(id));
    }

    fn configure_closed_loop(&mut self, id: ActId, mode: LoopMode, gains: PidGains) {
        debug!("{:?} configured for {:?} control with {:?}", id, mode, gains);
        let act = self.acts.entry(id).or_default();
        act.mode = Some(mode);
        act.gains = gains;
        self.calls.push(MechCall::ConfigureClosedLoop(id, mode, gains));
    }

    fn zero_position(&mut self, id: ActId) {
        debug!("{:?} position zeroed", id);
        self.acts.entry(id).or_default().num_zeroed += 1;
        self.calls.push(MechCall::ZeroPosition(id));
    }
}
