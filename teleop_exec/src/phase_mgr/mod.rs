//! # Phase manager
//!
//! Tracks the match phase the platform is in and performs the one-off
//! reconfiguration required when a phase is entered, followed by the phase's
//! periodic processing each cycle.
//!
//! | Phase        | On entry                                             | Each cycle          |
//! |--------------|------------------------------------------------------|---------------------|
//! | `Disabled`   | nothing                                              | nothing             |
//! | `Autonomous` | all actuators in position mode, low gear, zero pos.  | hold everything at 0|
//! | `Teleop`     | drive in velocity mode, tower in position mode       | `DriveCtrl` cycle   |
//! | `Test`       | nothing                                              | nothing             |

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{info, trace};

use comms_if::{
    eqpt::mech::{ActId, BinActId, BinaryState, LoopMode, MechDems, ALL_IDS},
    tc::Phase,
};
use util::{params as util_params, session::Session};

use crate::{
    drive_ctrl::{DriveCtrl, StatusReport},
    hal::{MechInterface, OperatorInput},
    mech_client,
};

pub use params::Params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Phase manager state.
#[derive(Default)]
pub struct PhaseMgr {
    params: Params,

    /// The phase currently being executed.
    current: Phase,

    /// A phase requested since the last cycle, entered at the start of the
    /// next cycle.
    requested: Option<Phase>,
}

/// Summary of one cycle of the phase manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReport {
    /// The phase executed this cycle.
    pub phase: Phase,

    /// True if the phase was entered this cycle.
    pub entered: bool,

    /// The drive control status, in teleop only.
    pub drive: Option<StatusReport>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PhaseMgr {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            current: Phase::Disabled,
            requested: None,
        }
    }

    /// Load the parameters from the given parameter file.
    pub fn init(&mut self, params_path: &str, _session: &Session) 
        -> Result<(), util_params::LoadError>
    {
        *self = Self::new(util_params::load(params_path)?);
        Ok(())
    }

    /// The phase currently being executed.
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Request a change of phase.
    ///
    /// Requesting the phase already being executed does nothing.
    pub fn request(&mut self, phase: Phase) {
        if phase == self.current {
            self.requested = None;
            return;
        }

        info!("Phase change requested: {:?} -> {:?}", self.current, phase);
        self.requested = Some(phase);
    }

    /// Run one cycle: enter any requested phase, then do the phase's periodic
    /// processing.
    pub fn proc<I, M>(
        &mut self, 
        drive_ctrl: &mut DriveCtrl, 
        input: &I, 
        mech: &mut M
    ) -> PhaseReport
    where
        I: OperatorInput + ?Sized,
        M: MechInterface + ?Sized
    {
        let entered = match self.requested.take() {
            Some(phase) => {
                self.enter(phase, mech);
                true
            },
            None => false
        };

        let drive = match self.current {
            Phase::Autonomous => {
                // There is no autonomous behaviour, hold everything still
                mech_client::send_demands(
                    mech, 
                    &MechDems::zeroed(), 
                    &drive_ctrl.dem_limits()
                );
                None
            },
            Phase::Teleop => {
                let (report, _) = drive_ctrl.cycle(input, mech);
                Some(report)
            },
            Phase::Disabled | Phase::Test => {
                trace!("{:?}: no actuation", self.current);
                None
            }
        };

        PhaseReport {
            phase: self.current,
            entered,
            drive
        }
    }

    /// Perform the one-off actions on entering a phase.
    fn enter<M>(&mut self, phase: Phase, mech: &mut M)
    where
        M: MechInterface + ?Sized
    {
        let gains = self.params.gains;

        match phase {
            Phase::Autonomous => {
                for id in ALL_IDS.iter() {
                    mech.configure_closed_loop(*id, LoopMode::Position, gains);
                }
                mech.set_binary(BinActId::GearShift, BinaryState::Reverse);
                for id in ALL_IDS.iter() {
                    mech.zero_position(*id);
                }
            },
            Phase::Teleop => {
                for id in ALL_IDS.iter() {
                    let mode = match id {
                        ActId::Tower => LoopMode::Position,
                        _ => LoopMode::Velocity
                    };
                    mech.configure_closed_loop(*id, mode, gains);
                }
            },
            Phase::Disabled | Phase::Test => ()
        }

        info!("Entered {:?} phase", phase);
        self.current = phase;
    }
}
