//! # Data Store

use comms_if::eqpt::joystick::JoystickFrame;

use crate::{
    drive_ctrl::DriveCtrl,
    phase_mgr::{PhaseMgr, PhaseReport},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // Operator input
    /// The latest joystick sample, held until a new one arrives
    pub joystick: JoystickFrame,

    // Modules
    pub phase_mgr: PhaseMgr,
    pub drive_ctrl: DriveCtrl,
    pub phase_rpt: Option<PhaseReport>,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_second = (cycle_frequency_hz.round() as u128).max(1);

        self.is_1_hz_cycle = self.num_cycles % cycles_per_second == 0;

        self.phase_rpt = None;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}
