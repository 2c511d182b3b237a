//! # Teleoperation Executable Parameters
//!
//! This module provide parameters for the teleoperation executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TeleopExecParams {

    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Write the drive control archive every cycle.
    pub archive: bool,

    /// Number of consecutive cycle overruns after which the exec stops.
    pub max_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TeleopExecParams {
    /// Returns `true` if the cycle period is a positive, finite number of
    /// seconds.
    pub fn cycle_period_valid(&self) -> bool {
        self.cycle_period_s.is_finite() && self.cycle_period_s > 0.0
    }
}
